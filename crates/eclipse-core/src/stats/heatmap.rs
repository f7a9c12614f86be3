//! Focus heatmap by weekday and hour.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use super::{FocusSession, DAY_NAMES};

/// First hour shown on the heatmap (inclusive).
pub const HEATMAP_START_HOUR: u8 = 6;
/// Last hour shown on the heatmap (exclusive).
pub const HEATMAP_END_HOUR: u8 = 22;

/// Heatmap cell data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// 0-6, Sunday=0
    pub day_of_week: u8,
    pub hour: u8,
    /// Minutes in this cell relative to the busiest cell (0.0-1.0)
    pub intensity: f64,
    pub sessions: u32,
    #[serde(skip)]
    total_minutes: u64,
}

impl HeatmapCell {
    fn new(day_of_week: u8, hour: u8) -> Self {
        Self {
            day_of_week,
            hour,
            intensity: 0.0,
            sessions: 0,
            total_minutes: 0,
        }
    }

    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[self.day_of_week as usize % 7]
    }

    /// Shade for ASCII rendering.
    pub fn heat_char(&self) -> char {
        match self.intensity {
            i if i <= 0.0 => ' ',
            i if i < 0.25 => '░',
            i if i < 0.5 => '▒',
            i if i < 0.75 => '▓',
            _ => '█',
        }
    }
}

/// Bucket sessions into a 7 x 16 grid (Sunday first, hours 06-21).
///
/// Sessions starting outside the displayed hours are ignored. Intensity is
/// total minutes over the busiest cell's minutes, with the divisor floored
/// at one so an empty grid is all zeros.
pub fn compute_heatmap(sessions: &[FocusSession]) -> Vec<HeatmapCell> {
    let hours_per_day = (HEATMAP_END_HOUR - HEATMAP_START_HOUR) as usize;
    let mut cells: Vec<HeatmapCell> = (0..7u8)
        .flat_map(|day| (HEATMAP_START_HOUR..HEATMAP_END_HOUR).map(move |hour| HeatmapCell::new(day, hour)))
        .collect();

    for session in sessions {
        let hour = session.date.hour() as u8;
        if !(HEATMAP_START_HOUR..HEATMAP_END_HOUR).contains(&hour) {
            continue;
        }
        let day = session.date.weekday().num_days_from_sunday() as usize;
        let cell = &mut cells[day * hours_per_day + (hour - HEATMAP_START_HOUR) as usize];
        cell.sessions += 1;
        cell.total_minutes += u64::from(session.duration_minutes);
    }

    let max_minutes = cells.iter().map(|c| c.total_minutes).max().unwrap_or(0).max(1);
    for cell in &mut cells {
        cell.intensity = cell.total_minutes as f64 / max_minutes as f64;
    }
    cells
}

/// Render the heatmap as text, one row per weekday.
pub fn render_ascii_heatmap(cells: &[HeatmapCell]) -> String {
    let mut output = String::from("    ");
    for hour in HEATMAP_START_HOUR..HEATMAP_END_HOUR {
        output.push_str(&format!("{hour:<3}"));
    }
    output.push('\n');

    for (day, name) in DAY_NAMES.iter().enumerate() {
        output.push_str(&format!("{name} "));
        for cell in cells.iter().filter(|c| c.day_of_week as usize == day) {
            output.push(cell.heat_char());
            output.push_str("  ");
        }
        output.push('\n');
    }
    output.push_str("\n░ <25%  ▒ <50%  ▓ <75%  █ peak\n");
    output
}
