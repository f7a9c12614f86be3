//! Property tests for the cognitive scheduler.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eclipse_core::{
    schedule_tasks, CognitiveScheduler, SchedulerConfig, SchedulingContext, SchedulingMode, Task,
    TaskDifficulty, TaskStatus, TaskType,
};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn arb_task_type() -> impl Strategy<Value = TaskType> {
    prop_oneof![Just(TaskType::BrainBurner), Just(TaskType::Autopilot)]
}

fn arb_difficulty() -> impl Strategy<Value = TaskDifficulty> {
    prop_oneof![
        Just(TaskDifficulty::Easy),
        Just(TaskDifficulty::Medium),
        Just(TaskDifficulty::Hard),
    ]
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        4 => Just(TaskStatus::Pending),
        1 => Just(TaskStatus::Active),
        1 => Just(TaskStatus::Completed),
        1 => Just(TaskStatus::Skipped),
    ]
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((arb_task_type(), arb_difficulty(), arb_status()), 0..12).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (task_type, difficulty, status))| {
                    Task::new(format!("t-{i}"), task_type, difficulty, now()).with_status(status)
                })
                .collect()
        },
    )
}

/// Context with hours and counts outside their natural ranges included.
fn arb_context() -> impl Strategy<Value = SchedulingContext> {
    (-2i32..27, -1i32..6, 0i64..96, 1u32..40).prop_map(|(hour, done, hours_ago, level)| {
        SchedulingContext::new(hour, done, now() - Duration::hours(hours_ago), level)
    })
}

/// Context that never trips the inactivity rule.
fn arb_active_context(hours: std::ops::Range<i32>, done: std::ops::Range<i32>) -> impl Strategy<Value = SchedulingContext> {
    (hours, done, 0i64..=24, 1u32..40).prop_map(|(hour, done, hours_ago, level)| {
        SchedulingContext::new(hour, done, now() - Duration::hours(hours_ago), level)
    })
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

proptest! {
    #[test]
    fn inactivity_yields_single_starter(
        tasks in arb_tasks(),
        hour in -2i32..27,
        done in -1i32..6,
        hours_ago in 25i64..500,
    ) {
        let ctx = SchedulingContext::new(hour, done, now() - Duration::hours(hours_ago), 1);
        let result = schedule_tasks(&tasks, &ctx, now());
        prop_assert_eq!(result.mode, SchedulingMode::ReEngagement);
        prop_assert!(result.tasks.len() <= 1);
        if let Some(starter) = result.tasks.first() {
            prop_assert!(tasks.contains(starter));
            prop_assert!(starter.is_pending());
        }
    }

    #[test]
    fn cap_removes_brain_burners(tasks in arb_tasks(), ctx in arb_active_context(-2..27, 3..50)) {
        let result = schedule_tasks(&tasks, &ctx, now());
        prop_assert!(result.tasks.iter().all(|t| !t.is_brain_burner()));
    }

    #[test]
    fn window_partitions_stably(tasks in arb_tasks(), ctx in arb_active_context(15..18, -1..6)) {
        let result = schedule_tasks(&tasks, &ctx, now());
        prop_assert_eq!(result.mode, SchedulingMode::Autopilot);

        let first_other = result.tasks.iter().position(|t| !t.is_autopilot());
        if let Some(split) = first_other {
            prop_assert!(result.tasks[split..].iter().all(|t| !t.is_autopilot()));
        }

        let expect_autopilot: Vec<&str> = tasks.iter().filter(|t| t.is_autopilot()).map(|t| t.id.as_str()).collect();
        let got_autopilot: Vec<&str> = result.tasks.iter().filter(|t| t.is_autopilot()).map(|t| t.id.as_str()).collect();
        prop_assert_eq!(got_autopilot, expect_autopilot);

        let cap_reached = ctx.brain_burners_completed_today >= 3;
        let expect_other: Vec<&str> = tasks
            .iter()
            .filter(|t| !t.is_autopilot() && !cap_reached)
            .map(|t| t.id.as_str())
            .collect();
        let got_other: Vec<&str> = result.tasks.iter().filter(|t| !t.is_autopilot()).map(|t| t.id.as_str()).collect();
        prop_assert_eq!(got_other, expect_other);
    }

    #[test]
    fn scheduling_is_idempotent(tasks in arb_tasks(), ctx in arb_context()) {
        let first = schedule_tasks(&tasks, &ctx, now());
        let second = schedule_tasks(&tasks, &ctx, now());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_drawn_from_input(tasks in arb_tasks(), ctx in arb_context()) {
        let result = schedule_tasks(&tasks, &ctx, now());
        prop_assert!(result.tasks.iter().all(|t| tasks.contains(t)));
        prop_assert!(result.tasks.len() <= tasks.len());
    }
}

fn scenario_tasks() -> Vec<Task> {
    vec![
        Task::new("bb-easy", TaskType::BrainBurner, TaskDifficulty::Easy, now()),
        Task::new("ap-easy", TaskType::Autopilot, TaskDifficulty::Easy, now()),
        Task::new("ap-medium", TaskType::Autopilot, TaskDifficulty::Medium, now()),
    ]
}

#[test]
fn inactive_user_gets_easy_autopilot_even_when_capped_in_window() {
    let ctx = SchedulingContext::new(16, 3, now() - Duration::hours(48), 1);
    let result = schedule_tasks(&scenario_tasks(), &ctx, now());
    assert_eq!(result.mode, SchedulingMode::ReEngagement);
    assert_eq!(ids(&result.tasks), vec!["ap-easy"]);
}

#[test]
fn custom_thresholds_change_decisions() {
    let scheduler = CognitiveScheduler::with_config(SchedulerConfig {
        brain_burner_daily_cap: 1,
        autopilot_window_start: 9,
        autopilot_window_end: 11,
        inactivity_threshold: Duration::hours(2),
    });

    let ctx = SchedulingContext::new(10, 1, now() - Duration::hours(1), 1);
    let result = scheduler.schedule(&scenario_tasks(), &ctx, now());
    assert_eq!(result.mode, SchedulingMode::Autopilot);
    assert_eq!(ids(&result.tasks), vec!["ap-easy", "ap-medium"]);

    let ctx = SchedulingContext::new(10, 0, now() - Duration::hours(3), 1);
    let result = scheduler.schedule(&scenario_tasks(), &ctx, now());
    assert_eq!(result.mode, SchedulingMode::ReEngagement);
}

#[test]
fn daily_pool_schedules_in_focus_mode() {
    let scheduler = CognitiveScheduler::new();
    let ctx = SchedulingContext::new(9, 0, now(), 1);
    let result = eclipse_core::scheduled_daily_tasks(&scheduler, &ctx, now());
    assert_eq!(result.mode, SchedulingMode::Focus);
    assert_eq!(result.tasks.len(), 10);
}
