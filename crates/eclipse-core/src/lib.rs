//! # Eclipse Core Library
//!
//! This library provides the core logic for Eclipse, a gamified focus and
//! productivity tracker. Every operation is exposed through the `eclipse`
//! CLI binary; the library itself holds no global state.
//!
//! ## Architecture
//!
//! - **Scheduler**: A rule pipeline that decides which tasks to present
//!   based on cognitive load, time of day and user inactivity
//! - **Progression**: XP, levels and rank tiers
//! - **Story**: Chapter catalogue unlocked by level
//! - **Analytics**: Focus-session and energy-usage aggregations
//! - **Storage**: SQLite-backed profile store and TOML configuration
//!
//! ## Key Components
//!
//! - [`CognitiveScheduler`]: Task scheduling rule engine
//! - [`ProgressionSnapshot`]: Level and rank derived from total XP
//! - [`Database`]: Local profile, session and presence persistence
//! - [`Config`]: Application configuration management

pub mod task;
pub mod scheduler;
pub mod progression;
pub mod story;
pub mod stats;
pub mod energy;
pub mod storage;
pub mod error;

pub use task::{generate_daily_tasks, Task, TaskDifficulty, TaskStatus, TaskType};
pub use scheduler::{
    schedule_tasks, scheduled_daily_tasks, CognitiveScheduler, SchedulerConfig,
    SchedulingContext, SchedulingMode, SchedulingResult,
};
pub use progression::{check_level_up, LevelUp, ProgressionSnapshot, RankTier, XpAward};
pub use story::{Alignment, Chapter};
pub use stats::{FocusSession, HeatmapCell, StreakData};
pub use energy::{DashboardStats, EnergyCategory, EnergyReading, EnergyStats};
pub use storage::{Completion, Config, Database, Profile};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
