//! Period statistics, dashboard totals and chart series.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{round2, EnergyReading};
use crate::stats::window_dates;

const DAYS_IN_WEEK: i64 = 7;
const DAYS_IN_MONTH: i64 = 30;

/// Emission factor applied to the monthly total.
pub const CARBON_FACTOR: f64 = 0.42;

const CHART_COLORS: [&str; 7] = [
    "#6366f1", "#8b5cf6", "#a78bfa", "#c4b5fd", "#818cf8", "#7c3aed", "#6d28d9",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStats {
    pub total_energy: f64,
    pub average_daily: f64,
    pub peak_usage: f64,
    /// Average daily over peak, in percent
    pub efficiency: f64,
    pub trend: Trend,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

/// Summarize readings in input order.
///
/// The trend compares the sum of the second half of the readings with the
/// first half: more than 5% higher is `Up`, more than 5% lower is `Down`.
/// With no readings every figure is zero and the period collapses to `now`.
pub fn calculate_energy_stats(readings: &[EnergyReading], now: DateTime<Utc>) -> EnergyStats {
    if readings.is_empty() {
        return EnergyStats {
            total_energy: 0.0,
            average_daily: 0.0,
            peak_usage: 0.0,
            efficiency: 0.0,
            trend: Trend::Stable,
            period_start: now,
            period_end: now,
        };
    }

    let total: f64 = readings.iter().map(|r| r.value).sum();
    let peak = readings.iter().map(|r| r.value).fold(f64::NEG_INFINITY, f64::max);
    let unique_days: HashSet<NaiveDate> = readings.iter().map(|r| r.timestamp.date_naive()).collect();
    let average_daily = total / unique_days.len() as f64;

    let midpoint = readings.len() / 2;
    let first_half: f64 = readings[..midpoint].iter().map(|r| r.value).sum();
    let second_half: f64 = readings[midpoint..].iter().map(|r| r.value).sum();
    let trend = if second_half > first_half * 1.05 {
        Trend::Up
    } else if second_half < first_half * 0.95 {
        Trend::Down
    } else {
        Trend::Stable
    };

    let efficiency = if peak > 0.0 {
        average_daily / peak * 100.0
    } else {
        0.0
    };

    let period_start = readings.iter().map(|r| r.timestamp).min().unwrap_or(now);
    let period_end = readings.iter().map(|r| r.timestamp).max().unwrap_or(now);

    EnergyStats {
        total_energy: round2(total),
        average_daily: round2(average_daily),
        peak_usage: round2(peak),
        efficiency: round2(efficiency),
        trend,
        period_start,
        period_end,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub current_energy: f64,
    pub daily_average: f64,
    pub weekly_total: f64,
    pub monthly_total: f64,
    pub savings_percent: f64,
    pub carbon_offset: f64,
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn sum_in(readings: &[EnergyReading], from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> f64 {
    readings
        .iter()
        .filter(|r| r.timestamp >= from && to.map_or(true, |end| r.timestamp < end))
        .map(|r| r.value)
        .sum()
}

/// Totals for today, the last 7 and 30 days, and today's savings against
/// the 30-day daily average.
///
/// Weekly and monthly windows start at midnight 7 and 30 days before today
/// and are open-ended, as is today's window.
pub fn dashboard_stats(readings: &[EnergyReading], now: DateTime<Utc>) -> DashboardStats {
    let today = now.date_naive();
    let today_start = day_start(today);

    let current = sum_in(readings, today_start, None);
    let weekly = sum_in(readings, day_start(today - Duration::days(DAYS_IN_WEEK)), None);
    let monthly = sum_in(readings, day_start(today - Duration::days(DAYS_IN_MONTH)), None);

    let daily_total: f64 = (0..DAYS_IN_MONTH)
        .map(|i| {
            let start = day_start(today - Duration::days(i));
            sum_in(readings, start, Some(start + Duration::days(1)))
        })
        .sum();
    let daily_average = daily_total / DAYS_IN_MONTH as f64;

    let savings = if daily_average > 0.0 {
        ((daily_average - current) / daily_average * 100.0).max(0.0)
    } else {
        0.0
    };

    DashboardStats {
        current_energy: round2(current),
        daily_average: round2(daily_average),
        weekly_total: round2(weekly),
        monthly_total: round2(monthly),
        savings_percent: round2(savings),
        carbon_offset: round2(monthly * CARBON_FACTOR),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One point per day for the last `days` days, oldest first, labeled by
/// weekday. The window is capped as in [`window_dates`].
pub fn chart_data(readings: &[EnergyReading], days: u32, now: DateTime<Utc>) -> Vec<ChartDataPoint> {
    window_dates(now.date_naive(), days)
        .into_iter()
        .map(|(i, date)| {
            let start = day_start(date);
            let total = sum_in(readings, start, Some(start + Duration::days(1)));
            ChartDataPoint {
                label: crate::stats::weekday_name(date.weekday()).to_string(),
                value: round2(total),
                color: Some(CHART_COLORS[i as usize % CHART_COLORS.len()].to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyCategory;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        // Wednesday
        Utc.with_ymd_and_hms(2024, 7, 17, 15, 0, 0).unwrap()
    }

    fn reading(at: DateTime<Utc>, value: f64) -> EnergyReading {
        EnergyReading {
            id: format!("r-{}", at.timestamp()),
            user_id: "local".into(),
            value,
            unit: "kWh".into(),
            timestamp: at,
            source: "Grid Import".into(),
            category: EnergyCategory::Grid,
        }
    }

    #[test]
    fn empty_stats_are_zero_and_stable() {
        let stats = calculate_energy_stats(&[], now());
        assert_eq!(stats.total_energy, 0.0);
        assert_eq!(stats.trend, Trend::Stable);
        assert_eq!(stats.period_start, now());
        assert_eq!(stats.period_end, now());
    }

    #[test]
    fn stats_totals_peak_and_trend() {
        let day1 = now() - Duration::days(1);
        let readings = vec![
            reading(day1, 2.0),
            reading(day1 + Duration::hours(1), 2.0),
            reading(now(), 4.0),
            reading(now() + Duration::minutes(5), 6.0),
        ];
        let stats = calculate_energy_stats(&readings, now());
        assert_eq!(stats.total_energy, 14.0);
        assert_eq!(stats.peak_usage, 6.0);
        assert_eq!(stats.average_daily, 7.0);
        assert_eq!(stats.efficiency, 116.67);
        assert_eq!(stats.trend, Trend::Up);
        assert_eq!(stats.period_start, day1);
    }

    #[test]
    fn downward_and_flat_trends() {
        let t = now();
        let down = vec![reading(t, 10.0), reading(t, 5.0)];
        assert_eq!(calculate_energy_stats(&down, t).trend, Trend::Down);
        let flat = vec![reading(t, 10.0), reading(t, 10.4)];
        assert_eq!(calculate_energy_stats(&flat, t).trend, Trend::Stable);
    }

    #[test]
    fn dashboard_windows() {
        let readings = vec![
            reading(now() - Duration::hours(1), 3.0),
            reading(now() - Duration::days(3), 9.0),
            reading(now() - Duration::days(20), 18.0),
            reading(now() - Duration::days(60), 100.0),
        ];
        let stats = dashboard_stats(&readings, now());
        assert_eq!(stats.current_energy, 3.0);
        assert_eq!(stats.weekly_total, 12.0);
        assert_eq!(stats.monthly_total, 30.0);
        assert_eq!(stats.daily_average, 1.0);
        assert_eq!(stats.savings_percent, 0.0);
        assert_eq!(stats.carbon_offset, 12.6);
    }

    #[test]
    fn savings_against_average() {
        let readings = vec![reading(now() - Duration::days(2), 60.0)];
        let stats = dashboard_stats(&readings, now());
        assert_eq!(stats.daily_average, 2.0);
        assert_eq!(stats.savings_percent, 100.0);
    }

    #[test]
    fn chart_is_oldest_first_with_weekday_labels() {
        let readings = vec![
            reading(now(), 1.5),
            reading(now() - Duration::days(1), 2.25),
        ];
        let points = chart_data(&readings, 7, now());
        assert_eq!(points.len(), 7);
        assert_eq!(points[6].label, "Wed");
        assert_eq!(points[6].value, 1.5);
        assert_eq!(points[5].label, "Tue");
        assert_eq!(points[5].value, 2.25);
        assert_eq!(points[6].color.as_deref(), Some("#6366f1"));
        assert_eq!(points[0].label, "Thu");
    }

    #[test]
    fn chart_window_is_capped() {
        let points = chart_data(&[], u32::MAX, now());
        assert_eq!(points.len(), crate::stats::MAX_WINDOW_DAYS as usize);
        assert_eq!(points.last().map(|p| p.label.as_str()), Some("Wed"));
    }
}
