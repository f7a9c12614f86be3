//! XP, levels and rank tiers.
//!
//! Level 1 starts at 0 XP and every further level costs a flat
//! [`XP_PER_LEVEL`]. Ranks are coarse tiers keyed by minimum level.

use serde::{Deserialize, Serialize};

use crate::task::TaskType;

pub const XP_PER_AUTOPILOT: u64 = 10;
pub const XP_PER_BRAIN_BURNER: u64 = 25;
pub const XP_PER_LEVEL: u64 = 100;

/// A rank tier with its display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankTier {
    pub name: &'static str,
    pub min_level: u32,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Ordered by ascending `min_level`.
pub const RANK_TIERS: [RankTier; 5] = [
    RankTier { name: "Beginner", min_level: 1, color: "#64748b", icon: "\u{25C6}" },
    RankTier { name: "Builder", min_level: 5, color: "#6366f1", icon: "\u{25C8}" },
    RankTier { name: "Architect", min_level: 10, color: "#8b5cf6", icon: "\u{2726}" },
    RankTier { name: "Elite", min_level: 20, color: "#f59e0b", icon: "\u{2B21}" },
    RankTier { name: "Eclipse Master", min_level: 35, color: "#ef4444", icon: "\u{2727}" },
];

pub fn level_from_xp(total_xp: u64) -> u32 {
    u32::try_from(total_xp / XP_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// XP earned inside the current level (0-99).
pub fn xp_in_current_level(total_xp: u64) -> u64 {
    total_xp % XP_PER_LEVEL
}

/// Percent through the current level (0.0-100.0).
pub fn level_progress(total_xp: u64) -> f64 {
    xp_in_current_level(total_xp) as f64 / XP_PER_LEVEL as f64 * 100.0
}

pub fn xp_to_next_level(total_xp: u64) -> u64 {
    XP_PER_LEVEL - xp_in_current_level(total_xp)
}

/// Highest tier whose minimum level is reached. Levels below 1 map to the
/// first tier.
pub fn rank_for_level(level: u32) -> RankTier {
    RANK_TIERS
        .iter()
        .rev()
        .find(|tier| level >= tier.min_level)
        .copied()
        .unwrap_or(RANK_TIERS[0])
}

pub fn xp_for_task_type(task_type: TaskType) -> u64 {
    match task_type {
        TaskType::BrainBurner => XP_PER_BRAIN_BURNER,
        TaskType::Autopilot => XP_PER_AUTOPILOT,
    }
}

/// Everything the dashboard shows about progression, derived from total XP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionSnapshot {
    pub total_xp: u64,
    pub level: u32,
    pub rank: RankTier,
    pub current_level_xp: u64,
    pub progress: f64,
    pub remaining: u64,
}

impl ProgressionSnapshot {
    pub fn from_xp(total_xp: u64) -> Self {
        let level = level_from_xp(total_xp);
        Self {
            total_xp,
            level,
            rank: rank_for_level(level),
            current_level_xp: xp_in_current_level(total_xp),
            progress: level_progress(total_xp),
            remaining: xp_to_next_level(total_xp),
        }
    }
}

/// Outcome of gaining XP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelUp {
    pub leveled_up: bool,
    pub new_level: u32,
    pub ranked_up: bool,
    pub new_rank: RankTier,
}

pub fn check_level_up(current_xp: u64, xp_gained: u64) -> LevelUp {
    let old_level = level_from_xp(current_xp);
    let new_level = level_from_xp(current_xp.saturating_add(xp_gained));
    let old_rank = rank_for_level(old_level);
    let new_rank = rank_for_level(new_level);

    LevelUp {
        leveled_up: new_level > old_level,
        new_level,
        ranked_up: new_rank.name != old_rank.name,
        new_rank,
    }
}

/// The computed side of awarding XP for a finished task.
///
/// Persisting the award is done by [`crate::storage::Database::award_xp`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XpAward {
    pub xp_gained: u64,
    pub leveled_up: bool,
    pub ranked_up: bool,
    pub snapshot: ProgressionSnapshot,
}

impl XpAward {
    pub fn for_task(current_xp: u64, task_type: TaskType) -> Self {
        let xp_gained = xp_for_task_type(task_type);
        let check = check_level_up(current_xp, xp_gained);
        Self {
            xp_gained,
            leveled_up: check.leveled_up,
            ranked_up: check.ranked_up,
            snapshot: ProgressionSnapshot::from_xp(current_xp.saturating_add(xp_gained)),
        }
    }
}
