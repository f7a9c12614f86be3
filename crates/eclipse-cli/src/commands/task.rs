//! Daily task pool commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use eclipse_core::stats::validate_depth_score;
use eclipse_core::{Database, FocusSession, TaskStatus};
use serde::Serialize;

use super::{load_daily_tasks, print_json, save_daily_tasks, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List today's tasks
    List {
        /// Only pending tasks
        #[arg(long)]
        pending: bool,
    },
    /// Complete a task, award XP and log the focus session
    Complete {
        /// Task ID
        id: String,
        /// Focus depth for the session (0-100)
        #[arg(long, default_value = "50")]
        depth: u32,
        /// Session length in minutes (default: the task's estimate)
        #[arg(long)]
        minutes: Option<u32>,
    },
}

#[derive(Serialize)]
struct CompletionReport {
    task_id: String,
    xp_gained: u64,
    total_xp: u64,
    level: u32,
    rank: &'static str,
    leveled_up: bool,
    ranked_up: bool,
    brain_burners_today: i32,
}

pub fn run(action: TaskAction) -> CmdResult {
    let db = Database::open()?;
    let now = Utc::now();

    match action {
        TaskAction::List { pending } => {
            let tasks: Vec<_> = load_daily_tasks(&db, now)?
                .into_iter()
                .filter(|t| !pending || t.is_pending())
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Complete { id, depth, minutes } => {
            validate_depth_score(depth)?;
            let mut tasks = load_daily_tasks(&db, now)?;
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("task not found: {id}"))?;
            if task.status == TaskStatus::Completed {
                return Err(format!("task already completed: {id}").into());
            }

            let completion = db.complete_task(task.task_type, now)?;
            db.record_focus_session(&FocusSession {
                date: now,
                duration_minutes: minutes.unwrap_or(task.estimated_minutes),
                task_type: task.task_type,
                depth_score: depth,
            })?;

            task.status = TaskStatus::Completed;
            task.completed_at = Some(now);
            let task_id = task.id.clone();
            save_daily_tasks(&db, now.date_naive(), &tasks)?;

            let snapshot = &completion.award.snapshot;
            print_json(&CompletionReport {
                task_id,
                xp_gained: completion.award.xp_gained,
                total_xp: snapshot.total_xp,
                level: snapshot.level,
                rank: snapshot.rank.name,
                leveled_up: completion.award.leveled_up,
                ranked_up: completion.award.ranked_up,
                brain_burners_today: completion.brain_burners_today,
            })?;
        }
    }
    Ok(())
}
