//! Daily consistency streaks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{window_dates, FocusSession};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    /// Consecutive active days ending today
    pub current_streak: u32,
    pub longest_streak: u32,
    /// One flag per day in the window, oldest first
    pub active_days: Vec<bool>,
}

/// Streaks over the last `days` days ending today.
///
/// A day with no session breaks the current streak, including today. The
/// window is capped as in [`window_dates`].
pub fn compute_streaks(sessions: &[FocusSession], days: u32, now: DateTime<Utc>) -> StreakData {
    let today = now.date_naive();
    let session_days: HashSet<NaiveDate> = sessions.iter().map(|s| s.date.date_naive()).collect();

    let active_days: Vec<bool> = window_dates(today, days)
        .into_iter()
        .map(|(_, date)| session_days.contains(&date))
        .collect();

    let current_streak = active_days.iter().rev().take_while(|&&active| active).count() as u32;

    let mut longest_streak = 0;
    let mut run = 0;
    for &active in &active_days {
        if active {
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    StreakData {
        current_streak,
        longest_streak,
        active_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 21, 0, 0).unwrap()
    }

    fn sessions_on(days_ago: &[i64]) -> Vec<FocusSession> {
        days_ago
            .iter()
            .map(|&d| FocusSession {
                date: now() - Duration::days(d),
                duration_minutes: 25,
                task_type: TaskType::Autopilot,
                depth_score: 70,
            })
            .collect()
    }

    #[test]
    fn current_and_longest() {
        // Active: today, 1, 2 days ago; 4..=7 days ago
        let sessions = sessions_on(&[0, 1, 2, 4, 5, 6, 7, 7]);
        let streaks = compute_streaks(&sessions, 10, now());
        assert_eq!(streaks.current_streak, 3);
        assert_eq!(streaks.longest_streak, 4);
        assert_eq!(streaks.active_days.len(), 10);
        assert_eq!(
            streaks.active_days,
            vec![false, false, true, true, true, true, false, true, true, true]
        );
    }

    #[test]
    fn inactive_today_resets_current() {
        let streaks = compute_streaks(&sessions_on(&[1, 2]), 5, now());
        assert_eq!(streaks.current_streak, 0);
        assert_eq!(streaks.longest_streak, 2);
    }

    #[test]
    fn empty_window() {
        let streaks = compute_streaks(&[], 0, now());
        assert_eq!(streaks.current_streak, 0);
        assert_eq!(streaks.longest_streak, 0);
        assert!(streaks.active_days.is_empty());
    }

    #[test]
    fn oversized_window_is_capped() {
        let streaks = compute_streaks(&sessions_on(&[0, 1]), 100_000_000, now());
        assert_eq!(streaks.active_days.len(), crate::stats::MAX_WINDOW_DAYS as usize);
        assert_eq!(streaks.current_streak, 2);
    }
}
