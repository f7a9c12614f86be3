//! Built-in daily task pool.

use chrono::{DateTime, Utc};

use super::{Task, TaskDifficulty, TaskStatus, TaskType};

/// Static description of a task, instantiated once per day.
#[derive(Debug, Clone, Copy)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub task_type: TaskType,
    pub difficulty: TaskDifficulty,
    pub xp_reward: u32,
    pub estimated_minutes: u32,
    pub tags: &'static [&'static str],
}

impl TaskTemplate {
    fn instantiate(&self, id: String, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            task_type: self.task_type,
            difficulty: self.difficulty,
            status: TaskStatus::Pending,
            xp_reward: self.xp_reward,
            estimated_minutes: self.estimated_minutes,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            created_at: now,
            completed_at: None,
        }
    }
}

pub const BRAIN_BURNER_POOL: [TaskTemplate; 5] = [
    TaskTemplate {
        title: "Solve the Logic Grid",
        description: "A 4x4 deduction puzzle. Read the clues, eliminate impossibilities, find the answer.",
        task_type: TaskType::BrainBurner,
        difficulty: TaskDifficulty::Hard,
        xp_reward: 50,
        estimated_minutes: 15,
        tags: &["logic", "deduction"],
    },
    TaskTemplate {
        title: "Memory Matrix",
        description: "Memorize a pattern of highlighted cells, then reproduce it from memory.",
        task_type: TaskType::BrainBurner,
        difficulty: TaskDifficulty::Medium,
        xp_reward: 35,
        estimated_minutes: 8,
        tags: &["memory", "spatial"],
    },
    TaskTemplate {
        title: "Sequence Break",
        description: "Identify the missing element in increasingly complex number sequences.",
        task_type: TaskType::BrainBurner,
        difficulty: TaskDifficulty::Medium,
        xp_reward: 30,
        estimated_minutes: 10,
        tags: &["pattern", "math"],
    },
    TaskTemplate {
        title: "Word Forge",
        description: "Create the longest possible word from a set of scrambled letters.",
        task_type: TaskType::BrainBurner,
        difficulty: TaskDifficulty::Easy,
        xp_reward: 20,
        estimated_minutes: 5,
        tags: &["language", "vocabulary"],
    },
    TaskTemplate {
        title: "Cipher Decode",
        description: "Decrypt a substitution cipher using frequency analysis and pattern matching.",
        task_type: TaskType::BrainBurner,
        difficulty: TaskDifficulty::Hard,
        xp_reward: 55,
        estimated_minutes: 20,
        tags: &["cryptography", "analysis"],
    },
];

pub const AUTOPILOT_POOL: [TaskTemplate; 5] = [
    TaskTemplate {
        title: "Daily Reflection",
        description: "Write three things you learned today in one sentence each.",
        task_type: TaskType::Autopilot,
        difficulty: TaskDifficulty::Easy,
        xp_reward: 10,
        estimated_minutes: 3,
        tags: &["reflection", "journaling"],
    },
    TaskTemplate {
        title: "Flashcard Review",
        description: "Review 10 spaced-repetition flashcards from your active deck.",
        task_type: TaskType::Autopilot,
        difficulty: TaskDifficulty::Easy,
        xp_reward: 15,
        estimated_minutes: 5,
        tags: &["review", "spaced-repetition"],
    },
    TaskTemplate {
        title: "Inbox Zero",
        description: "Process pending notifications and mark items as done or deferred.",
        task_type: TaskType::Autopilot,
        difficulty: TaskDifficulty::Easy,
        xp_reward: 10,
        estimated_minutes: 4,
        tags: &["organization", "cleanup"],
    },
    TaskTemplate {
        title: "Quick Quiz",
        description: "Answer 5 multiple-choice questions on a topic you are studying.",
        task_type: TaskType::Autopilot,
        difficulty: TaskDifficulty::Medium,
        xp_reward: 20,
        estimated_minutes: 6,
        tags: &["quiz", "assessment"],
    },
    TaskTemplate {
        title: "Progress Snapshot",
        description: "Review your weekly stats and identify one area to improve.",
        task_type: TaskType::Autopilot,
        difficulty: TaskDifficulty::Easy,
        xp_reward: 10,
        estimated_minutes: 3,
        tags: &["review", "planning"],
    },
];

/// Instantiate the full pool for `now`: brain burners first, then autopilot.
///
/// Ids are `bb-{index}-{millis}` and `ap-{index}-{millis}`, so two pools
/// generated at the same instant are identical.
pub fn generate_daily_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let stamp = now.timestamp_millis();
    let brain_burners = BRAIN_BURNER_POOL
        .iter()
        .enumerate()
        .map(|(i, t)| t.instantiate(format!("bb-{i}-{stamp}"), now));
    let autopilot = AUTOPILOT_POOL
        .iter()
        .enumerate()
        .map(|(i, t)| t.instantiate(format!("ap-{i}-{stamp}"), now));
    brain_burners.chain(autopilot).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pool_has_five_of_each_type() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let tasks = generate_daily_tasks(now);
        assert_eq!(tasks.len(), 10);
        assert_eq!(tasks.iter().filter(|t| t.is_brain_burner()).count(), 5);
        assert_eq!(tasks.iter().filter(|t| t.is_autopilot()).count(), 5);
        assert!(tasks.iter().all(|t| t.is_pending() && t.created_at == now));
    }

    #[test]
    fn ids_embed_index_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let tasks = generate_daily_tasks(now);
        let millis = now.timestamp_millis();
        assert_eq!(tasks[0].id, format!("bb-0-{millis}"));
        assert_eq!(tasks[5].id, format!("ap-0-{millis}"));
        assert_eq!(tasks[5].title, "Daily Reflection");
        assert_eq!(tasks[5].tags, vec!["reflection", "journaling"]);
    }
}
