use chrono::Utc;
use clap::Subcommand;
use eclipse_core::progression::RANK_TIERS;
use eclipse_core::{Database, ProgressionSnapshot, TaskType};
use serde::Serialize;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show XP, level, rank and story position
    Show,
    /// Award XP for a finished task without touching the daily pool
    Award {
        /// Task type: brain-burner or autopilot
        task_type: TaskType,
    },
    /// List rank tiers
    Levels,
}

#[derive(Serialize)]
struct ProgressReport {
    display_name: Option<String>,
    #[serde(flatten)]
    snapshot: ProgressionSnapshot,
    chapter: u32,
    alignment: String,
    brain_burners_today: i32,
}

pub fn run(action: ProgressAction) -> CmdResult {
    match action {
        ProgressAction::Show => {
            let db = Database::open()?;
            let profile = db.profile()?;
            print_json(&ProgressReport {
                display_name: profile.display_name.clone(),
                snapshot: profile.snapshot(),
                chapter: profile.chapter,
                alignment: profile.alignment.clone(),
                brain_burners_today: profile.brain_burners_completed_on(Utc::now().date_naive()),
            })?;
        }
        ProgressAction::Award { task_type } => {
            let db = Database::open()?;
            let award = db.award_xp(task_type, Utc::now())?;
            print_json(&award)?;
        }
        ProgressAction::Levels => {
            print_json(&RANK_TIERS)?;
        }
    }
    Ok(())
}
