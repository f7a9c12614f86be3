//! Focus-session analytics.
//!
//! Pure aggregations behind the analytics dashboard: an hour-by-weekday
//! heatmap, cumulative XP trend, focus depth distribution, task type
//! ratio and daily consistency streaks. Day boundaries are UTC dates.

mod heatmap;
mod mock;
mod streak;
mod trend;

pub use heatmap::{compute_heatmap, render_ascii_heatmap, HeatmapCell, HEATMAP_END_HOUR, HEATMAP_START_HOUR};
pub use mock::{generate_mock_sessions, ParkMiller, MOCK_SESSION_SEED};
pub use streak::{compute_streaks, StreakData};
pub use trend::{
    compute_depth_distribution, compute_task_ratio, compute_xp_trend, DepthBucket, TaskRatio,
    XpTrendPoint,
};

use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::TaskType;

/// One recorded focus session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// 0-100
    pub depth_score: u32,
}

/// Highest accepted focus depth.
pub const MAX_DEPTH_SCORE: u32 = 100;

/// Reject depth scores above [`MAX_DEPTH_SCORE`].
pub fn validate_depth_score(depth: u32) -> Result<u32, ValidationError> {
    if depth > MAX_DEPTH_SCORE {
        return Err(ValidationError::InvalidValue {
            field: "depth".to_string(),
            message: format!("must be between 0 and {MAX_DEPTH_SCORE}, got {depth}"),
        });
    }
    Ok(depth)
}

/// Longest window any per-day series covers. Larger requests are cut
/// down to this.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// `(days_ago, date)` for a window of `days` days ending on `today`,
/// oldest first.
///
/// The window is capped at [`MAX_WINDOW_DAYS`] and stops at the earliest
/// representable date.
pub fn window_dates(today: NaiveDate, days: u32) -> Vec<(u32, NaiveDate)> {
    let mut window: Vec<(u32, NaiveDate)> = (0..days.min(MAX_WINDOW_DAYS))
        .map_while(|offset| {
            today
                .checked_sub_days(Days::new(u64::from(offset)))
                .map(|date| (offset, date))
        })
        .collect();
    window.reverse();
    window
}

pub(crate) const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Three-letter weekday label.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_sunday() as usize]
}
