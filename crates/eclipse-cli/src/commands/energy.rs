use chrono::Utc;
use clap::Subcommand;
use eclipse_core::energy::{calculate_energy_stats, chart_data, dashboard_stats, generate_mock_energy_data};
use eclipse_core::Config;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Totals, peak, efficiency and trend over the window
    Stats,
    /// Today, week and month totals with savings and carbon offset
    Dashboard,
    /// Daily totals for a bar chart
    Chart {
        /// Days to show
        #[arg(long, default_value = "7")]
        days: u32,
    },
}

pub fn run(action: EnergyAction) -> CmdResult {
    let config = Config::load()?;
    let now = Utc::now();
    let readings = generate_mock_energy_data(
        config.analytics.window_days,
        Some(config.analytics.mock_seed),
        now,
    );
    tracing::debug!(readings = readings.len(), "generated demo energy readings");

    match action {
        EnergyAction::Stats => print_json(&calculate_energy_stats(&readings, now))?,
        EnergyAction::Dashboard => print_json(&dashboard_stats(&readings, now))?,
        EnergyAction::Chart { days } => print_json(&chart_data(&readings, days, now))?,
    }
    Ok(())
}
