//! XP trend, focus depth and task ratio.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{window_dates, FocusSession};
use crate::progression::{level_from_xp, xp_for_task_type};
use crate::task::TaskType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpTrendPoint {
    /// `M/D`
    pub label: String,
    pub xp: u64,
    pub level: u32,
}

/// Cumulative XP per day over the last `days` days, oldest first.
///
/// Only sessions inside the window count toward the running total. The
/// window is capped as in [`window_dates`].
pub fn compute_xp_trend(sessions: &[FocusSession], days: u32, now: DateTime<Utc>) -> Vec<XpTrendPoint> {
    let today = now.date_naive();
    let mut cumulative = 0u64;

    window_dates(today, days)
        .into_iter()
        .map(|(_, date)| {
            cumulative += sessions
                .iter()
                .filter(|s| s.date.date_naive() == date)
                .map(|s| xp_for_task_type(s.task_type))
                .sum::<u64>();
            XpTrendPoint {
                label: format!("{}/{}", date.month(), date.day()),
                xp: cumulative,
                level: level_from_xp(cumulative),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBucket {
    pub label: String,
    pub count: u32,
    /// Rounded percent of all sessions
    pub percentage: u32,
    pub color: String,
}

/// (label, lower bound inclusive, upper bound exclusive, color)
const DEPTH_BUCKETS: [(&str, u32, u32, &str); 4] = [
    ("Shallow", 0, 50, "#64748b"),
    ("Moderate", 50, 70, "#6366f1"),
    ("Deep", 70, 85, "#8b5cf6"),
    ("Flow State", 85, 101, "#22c55e"),
];

/// Bucket sessions by depth score. Scores above 100 fall outside every
/// bucket but still count toward the total.
pub fn compute_depth_distribution(sessions: &[FocusSession]) -> Vec<DepthBucket> {
    let total = sessions.len().max(1) as f64;

    DEPTH_BUCKETS
        .iter()
        .map(|&(label, min, max, color)| {
            let count = sessions
                .iter()
                .filter(|s| s.depth_score >= min && s.depth_score < max)
                .count() as u32;
            DepthBucket {
                label: label.to_string(),
                count,
                percentage: (f64::from(count) / total * 100.0).round() as u32,
                color: color.to_string(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRatio {
    pub brain_burner: u32,
    pub autopilot: u32,
    pub total: u32,
}

pub fn compute_task_ratio(sessions: &[FocusSession]) -> TaskRatio {
    let brain_burner = sessions
        .iter()
        .filter(|s| s.task_type == TaskType::BrainBurner)
        .count() as u32;
    TaskRatio {
        brain_burner,
        autopilot: sessions.len() as u32 - brain_burner,
        total: sessions.len() as u32,
    }
}
