pub mod analytics;
pub mod config;
pub mod energy;
pub mod presence;
pub mod progress;
pub mod schedule;
pub mod story;
pub mod task;

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};
use eclipse_core::{generate_daily_tasks, Database, Task};
use serde::{Deserialize, Serialize};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

const DAILY_TASKS_KEY: &str = "daily_tasks";

/// Today's pool as kept in the kv table.
#[derive(Serialize, Deserialize)]
struct DailyTasks {
    day: NaiveDate,
    tasks: Vec<Task>,
}

/// Load today's task pool, generating and storing a fresh one when the
/// stored pool belongs to another day.
pub fn load_daily_tasks(db: &Database, now: DateTime<Utc>) -> eclipse_core::Result<Vec<Task>> {
    let today = now.date_naive();
    if let Some(raw) = db.kv_get(DAILY_TASKS_KEY)? {
        match serde_json::from_str::<DailyTasks>(&raw) {
            Ok(stored) if stored.day == today => return Ok(stored.tasks),
            Ok(_) => tracing::debug!("daily task pool is stale, regenerating"),
            Err(e) => tracing::warn!(error = %e, "discarding unreadable daily task pool"),
        }
    }
    let tasks = generate_daily_tasks(now);
    save_daily_tasks(db, today, &tasks)?;
    Ok(tasks)
}

pub fn save_daily_tasks(db: &Database, day: NaiveDate, tasks: &[Task]) -> eclipse_core::Result<()> {
    let stored = DailyTasks {
        day,
        tasks: tasks.to_vec(),
    };
    db.kv_set(DAILY_TASKS_KEY, &serde_json::to_string(&stored)?)
}

/// Hour of day on the local clock.
pub fn local_hour() -> i32 {
    Local::now().hour() as i32
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
