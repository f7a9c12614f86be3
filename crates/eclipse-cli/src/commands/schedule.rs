use chrono::Utc;
use clap::Subcommand;
use eclipse_core::{CognitiveScheduler, Config, Database, Task};

use super::{load_daily_tasks, local_hour, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the tasks to work on right now
    Show {
        /// Override the current hour (0-23)
        #[arg(long)]
        hour: Option<i32>,
    },
}

pub fn run(action: ScheduleAction) -> CmdResult {
    match action {
        ScheduleAction::Show { hour } => {
            let config = Config::load()?;
            let db = Database::open()?;
            let now = Utc::now();

            let pending: Vec<Task> = load_daily_tasks(&db, now)?
                .into_iter()
                .filter(Task::is_pending)
                .collect();
            let context = db
                .profile()?
                .scheduling_context(hour.unwrap_or_else(local_hour), now.date_naive());

            let scheduler = CognitiveScheduler::with_config(config.scheduler_config());
            let result = scheduler.schedule(&pending, &context, now);
            print_json(&result)?;
        }
    }
    Ok(())
}
