//! Predicates and list transforms used by the scheduling pipeline.

use chrono::{DateTime, Utc};

use super::SchedulerConfig;
use crate::task::{Task, TaskType};

/// True when the user has been away strictly longer than the threshold.
pub fn is_inactive(config: &SchedulerConfig, last_active: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(last_active) > config.inactivity_threshold
}

/// Half-open afternoon band `[start, end)`.
pub fn is_autopilot_window(config: &SchedulerConfig, hour: i32) -> bool {
    hour >= config.autopilot_window_start && hour < config.autopilot_window_end
}

pub fn is_brain_burner_cap_reached(config: &SchedulerConfig, completed_today: i32) -> bool {
    completed_today >= config.brain_burner_daily_cap
}

/// Drop every brain burner once the cap is reached, otherwise keep the list as is.
pub fn filter_brain_burners(tasks: &[Task], cap_reached: bool) -> Vec<Task> {
    if !cap_reached {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|t| t.task_type != TaskType::BrainBurner)
        .cloned()
        .collect()
}

/// Stable partition: autopilot tasks first, everything else after.
pub fn prioritize_autopilot(tasks: Vec<Task>) -> Vec<Task> {
    let (mut autopilot, other): (Vec<Task>, Vec<Task>) =
        tasks.into_iter().partition(Task::is_autopilot);
    autopilot.extend(other);
    autopilot
}

/// Pick one easy task to ease a returning user back in.
///
/// Preference: easy autopilot, easy brain burner, any easy task, then the
/// first pending task. Only pending tasks are considered.
pub fn pick_starter_task(tasks: &[Task]) -> Option<&Task> {
    let pending = || tasks.iter().filter(|t| t.is_pending());

    pending()
        .find(|t| t.is_autopilot() && t.is_easy())
        .or_else(|| pending().find(|t| t.is_brain_burner() && t.is_easy()))
        .or_else(|| pending().find(|t| t.is_easy()))
        .or_else(|| pending().next())
}
