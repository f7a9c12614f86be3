//! Energy usage analytics.
//!
//! This module aggregates metered energy readings into period statistics,
//! dashboard totals and a per-day chart series, and can generate seeded
//! demo readings.

mod mock;
mod usage;

pub use mock::generate_mock_energy_data;
pub use usage::{
    calculate_energy_stats, chart_data, dashboard_stats, ChartDataPoint, DashboardStats,
    EnergyStats, Trend, CARBON_FACTOR,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source category of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyCategory {
    Solar,
    Wind,
    Hydro,
    Grid,
    Other,
}

/// A single metered reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub id: String,
    pub user_id: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub category: EnergyCategory,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
