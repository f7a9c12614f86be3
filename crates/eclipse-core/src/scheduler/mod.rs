//! Cognitive-load task scheduler.
//!
//! Decides which tasks to present and in what order. Rules are evaluated
//! in priority order and the first one that applies decides the mode:
//!
//! 1. Re-engagement: inactive longer than the threshold, return a single
//!    easy starter task and ignore every other rule
//! 2. Brain Burner cap: once the daily cap is reached, brain burners are
//!    removed (applies to both remaining modes)
//! 3. Autopilot window: during the afternoon band, autopilot tasks move to
//!    the front
//! 4. Focus: otherwise the (cap-filtered) list is returned as is
//!
//! The scheduler never touches a clock; `now` is always passed in.

pub mod rules;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::{generate_daily_tasks, Task};

pub const BRAIN_BURNER_DAILY_CAP: i32 = 3;
pub const AUTOPILOT_WINDOW_START: i32 = 15;
pub const AUTOPILOT_WINDOW_END: i32 = 18;
pub const INACTIVITY_THRESHOLD_HOURS: i64 = 24;

pub const REASON_RE_ENGAGEMENT: &str =
    "You have been away for a while. Here is a quick task to ease back in.";
pub const REASON_AUTOPILOT_CAPPED: &str =
    "Brain Burner limit reached. Autopilot tasks prioritized during the afternoon window.";
pub const REASON_AUTOPILOT: &str =
    "Afternoon energy dip detected. Autopilot tasks moved to the top.";
pub const REASON_FOCUS_CAPPED: &str =
    "Brain Burner limit reached for today. Showing remaining Autopilot tasks.";
pub const REASON_FOCUS: &str = "Full focus mode. All available tasks shown.";

/// Decision inputs for one scheduling pass.
///
/// Values are not validated: out-of-range hours and negative counts are
/// accepted and simply fail to match the corresponding rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingContext {
    /// Hour of day, 0-23
    pub current_hour: i32,
    pub brain_burners_completed_today: i32,
    pub last_active_time: DateTime<Utc>,
    /// Not consulted by any rule yet
    pub user_level: u32,
}

impl SchedulingContext {
    pub fn new(
        current_hour: i32,
        brain_burners_completed_today: i32,
        last_active_time: DateTime<Utc>,
        user_level: u32,
    ) -> Self {
        Self {
            current_hour,
            brain_burners_completed_today,
            last_active_time,
            user_level,
        }
    }
}

/// Which rule produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulingMode {
    Focus,
    Autopilot,
    ReEngagement,
}

impl SchedulingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulingMode::Focus => "focus",
            SchedulingMode::Autopilot => "autopilot",
            SchedulingMode::ReEngagement => "re-engagement",
        }
    }
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision output. `tasks` is always drawn from the input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub tasks: Vec<Task>,
    pub reason: String,
    pub mode: SchedulingMode,
}

/// Scheduler thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Brain burners allowed per day before they are hidden
    pub brain_burner_daily_cap: i32,
    /// First hour of the autopilot window (inclusive)
    pub autopilot_window_start: i32,
    /// End of the autopilot window (exclusive)
    pub autopilot_window_end: i32,
    /// Inactivity that triggers re-engagement
    pub inactivity_threshold: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            brain_burner_daily_cap: BRAIN_BURNER_DAILY_CAP,
            autopilot_window_start: AUTOPILOT_WINDOW_START,
            autopilot_window_end: AUTOPILOT_WINDOW_END,
            inactivity_threshold: Duration::hours(INACTIVITY_THRESHOLD_HOURS),
        }
    }
}

/// Rule engine for cognitive-load scheduling.
#[derive(Debug, Clone, Default)]
pub struct CognitiveScheduler {
    config: SchedulerConfig,
}

impl CognitiveScheduler {
    /// Create a new scheduler with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom thresholds
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one scheduling pass.
    ///
    /// Total over its inputs: an empty task list yields an empty result
    /// carrying the reason text of whichever mode was selected.
    pub fn schedule(
        &self,
        tasks: &[Task],
        context: &SchedulingContext,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let config = &self.config;

        if rules::is_inactive(config, context.last_active_time, now) {
            let starter = rules::pick_starter_task(tasks);
            tracing::debug!(
                candidates = tasks.len(),
                starter = starter.map(|t| t.id.as_str()),
                "re-engagement override"
            );
            return SchedulingResult {
                tasks: starter.cloned().into_iter().collect(),
                reason: REASON_RE_ENGAGEMENT.to_string(),
                mode: SchedulingMode::ReEngagement,
            };
        }

        let cap_reached =
            rules::is_brain_burner_cap_reached(config, context.brain_burners_completed_today);
        let filtered = rules::filter_brain_burners(tasks, cap_reached);

        let result = if rules::is_autopilot_window(config, context.current_hour) {
            SchedulingResult {
                tasks: rules::prioritize_autopilot(filtered),
                reason: if cap_reached {
                    REASON_AUTOPILOT_CAPPED
                } else {
                    REASON_AUTOPILOT
                }
                .to_string(),
                mode: SchedulingMode::Autopilot,
            }
        } else {
            SchedulingResult {
                tasks: filtered,
                reason: if cap_reached {
                    REASON_FOCUS_CAPPED
                } else {
                    REASON_FOCUS
                }
                .to_string(),
                mode: SchedulingMode::Focus,
            }
        };

        tracing::debug!(
            mode = %result.mode,
            candidates = tasks.len(),
            presented = result.tasks.len(),
            cap_reached,
            hour = context.current_hour,
            "scheduled tasks"
        );
        result
    }
}

/// Schedule with the default thresholds.
pub fn schedule_tasks(
    tasks: &[Task],
    context: &SchedulingContext,
    now: DateTime<Utc>,
) -> SchedulingResult {
    CognitiveScheduler::new().schedule(tasks, context, now)
}

/// Generate today's pool, keep pending tasks and schedule them.
pub fn scheduled_daily_tasks(
    scheduler: &CognitiveScheduler,
    context: &SchedulingContext,
    now: DateTime<Utc>,
) -> SchedulingResult {
    let pending: Vec<Task> = generate_daily_tasks(now)
        .into_iter()
        .filter(Task::is_pending)
        .collect();
    scheduler.schedule(&pending, context, now)
}
