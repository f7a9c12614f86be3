//! Task types for cognitive-load scheduling.
//!
//! Tasks are split into two load classes. Brain Burners demand full
//! attention and are capped per day; Autopilot tasks can be done on low
//! energy and are pushed forward during the afternoon dip.

mod pool;

pub use pool::{generate_daily_tasks, TaskTemplate, AUTOPILOT_POOL, BRAIN_BURNER_POOL};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cognitive load class of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    /// High cognitive load
    BrainBurner,
    /// Low cognitive load
    Autopilot,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::BrainBurner => "brain-burner",
            TaskType::Autopilot => "autopilot",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brain-burner" | "brain_burner" | "bb" => Ok(TaskType::BrainBurner),
            "autopilot" | "ap" => Ok(TaskType::Autopilot),
            other => Err(format!(
                "unknown task type '{other}' (expected brain-burner or autopilot)"
            )),
        }
    }
}

/// Task difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TaskDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDifficulty::Easy => "easy",
            TaskDifficulty::Medium => "medium",
            TaskDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for TaskDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. The scheduler only reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Skipped,
}

/// One candidate unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub difficulty: TaskDifficulty,
    pub status: TaskStatus,
    pub xp_reward: u32,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task with empty title, description and tags.
    pub fn new(
        id: impl Into<String>,
        task_type: TaskType,
        difficulty: TaskDifficulty,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            task_type,
            difficulty,
            status: TaskStatus::Pending,
            xp_reward: 0,
            estimated_minutes: 0,
            tags: Vec::new(),
            created_at,
            completed_at: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_easy(&self) -> bool {
        self.difficulty == TaskDifficulty::Easy
    }

    pub fn is_brain_burner(&self) -> bool {
        self.task_type == TaskType::BrainBurner
    }

    pub fn is_autopilot(&self) -> bool {
        self.task_type == TaskType::Autopilot
    }
}
