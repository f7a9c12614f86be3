//! Deterministic demo sessions for a fresh install.

use chrono::{DateTime, NaiveTime, Utc};

use super::{window_dates, FocusSession};
use crate::task::TaskType;

pub const MOCK_SESSION_SEED: u64 = 42;

const MODULUS: u64 = 2_147_483_647;
const MULTIPLIER: u64 = 16_807;

/// Park-Miller minimal standard generator.
///
/// Kept instead of a `rand` generator so the demo data set is stable
/// across library versions.
#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Next value in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Generate `days` days of sessions ending today.
///
/// Roughly 15% of days are skipped; active days get one to four sessions
/// starting between 08:00 and 19:59.
pub fn generate_mock_sessions(days: u32, now: DateTime<Utc>) -> Vec<FocusSession> {
    let mut rng = ParkMiller::new(MOCK_SESSION_SEED);
    let mut sessions = Vec::new();
    let today = now.date_naive();

    for (_, date) in window_dates(today, days).into_iter().rev() {

        if rng.next_f64() < 0.15 {
            continue;
        }
        let count = (rng.next_f64() * 4.0) as u32 + 1;

        for _ in 0..count {
            let hour = 8 + (rng.next_f64() * 12.0) as u32;
            let minute = (rng.next_f64() * 60.0) as u32;
            let start = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

            let is_brain_burner = rng.next_f64() > 0.55;
            let duration_minutes = if is_brain_burner && rng.next_f64() > 0.5 {
                50
            } else {
                25
            };

            sessions.push(FocusSession {
                date: date.and_time(start).and_utc(),
                duration_minutes,
                task_type: if is_brain_burner {
                    TaskType::BrainBurner
                } else {
                    TaskType::Autopilot
                },
                depth_score: 40 + (rng.next_f64() * 60.0) as u32,
            });
        }
    }

    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike};

    #[test]
    fn park_miller_known_sequence() {
        let mut rng = ParkMiller::new(1);
        rng.next_f64();
        assert_eq!(rng.state, 16_807);
        rng.next_f64();
        assert_eq!(rng.state, 282_475_249);
    }

    #[test]
    fn generator_stays_in_unit_interval() {
        let mut rng = ParkMiller::new(MOCK_SESSION_SEED);
        for _ in 0..1_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn mock_sessions_are_deterministic_and_plausible() {
        let now = Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap();
        let a = generate_mock_sessions(30, now);
        let b = generate_mock_sessions(30, now);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        for s in &a {
            assert!((8..20).contains(&s.date.hour()));
            assert!((40..100).contains(&s.depth_score));
            assert!(s.duration_minutes == 25 || s.duration_minutes == 50);
            if s.task_type == TaskType::Autopilot {
                assert_eq!(s.duration_minutes, 25);
            }
            assert!(s.date.date_naive() <= now.date_naive());
            assert!(s.date.date_naive() > now.date_naive() - Duration::days(30));
        }
    }
}
