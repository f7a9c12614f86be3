use chrono::{Duration, Utc};
use clap::Subcommand;
use eclipse_core::stats::{
    compute_depth_distribution, compute_heatmap, compute_streaks, compute_task_ratio,
    compute_xp_trend, generate_mock_sessions, render_ascii_heatmap,
};
use eclipse_core::{Config, Database, FocusSession};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Weekday by hour focus heatmap
    Heatmap {
        /// Print cells as JSON instead of a text grid
        #[arg(long)]
        json: bool,
    },
    /// Cumulative XP per day
    Trend {
        /// Days to cover (default: analytics.window_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Session count per focus depth bucket
    Depth,
    /// Brain burner to autopilot session ratio
    Ratio,
    /// Current and longest daily streak
    Streak {
        /// Days to cover (default: analytics.window_days)
        #[arg(long)]
        days: Option<u32>,
    },
}

/// Recorded sessions in the analytics window, or demo sessions when none
/// exist and demo data is enabled.
fn sessions(config: &Config) -> eclipse_core::Result<Vec<FocusSession>> {
    let now = Utc::now();
    let days = config.analytics.window_days;
    let db = Database::open()?;
    let recorded = db.focus_sessions_since(now - Duration::days(i64::from(days)))?;
    if recorded.is_empty() && config.analytics.use_mock_data {
        tracing::info!(days, "no recorded sessions, using demo data");
        return Ok(generate_mock_sessions(days, now));
    }
    Ok(recorded)
}

pub fn run(action: AnalyticsAction) -> CmdResult {
    let config = Config::load()?;
    let sessions = sessions(&config)?;
    let window = config.analytics.window_days;

    match action {
        AnalyticsAction::Heatmap { json } => {
            let cells = compute_heatmap(&sessions);
            if json {
                print_json(&cells)?;
            } else {
                print!("{}", render_ascii_heatmap(&cells));
            }
        }
        AnalyticsAction::Trend { days } => {
            print_json(&compute_xp_trend(&sessions, days.unwrap_or(window), Utc::now()))?;
        }
        AnalyticsAction::Depth => {
            print_json(&compute_depth_distribution(&sessions))?;
        }
        AnalyticsAction::Ratio => {
            print_json(&compute_task_ratio(&sessions))?;
        }
        AnalyticsAction::Streak { days } => {
            print_json(&compute_streaks(&sessions, days.unwrap_or(window), Utc::now()))?;
        }
    }
    Ok(())
}
