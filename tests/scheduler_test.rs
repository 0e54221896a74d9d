// tests/scheduler_test.rs

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use cardtrack::domain::{CardPriority, TimeUnit, UpdateSchedule};
use cardtrack::error::CardError;
use cardtrack::registry::{CardRegistry, InMemoryCardRegistry};
use cardtrack::schedule::scheduler::{InMemoryUpdateScheduler, UpdateScheduler};

fn at(h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2007, 8, 21)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn setup() -> (Arc<InMemoryCardRegistry>, Arc<InMemoryUpdateScheduler>) {
    let registry = Arc::new(InMemoryCardRegistry::new());
    let scheduler = InMemoryUpdateScheduler::new(
        registry.clone(),
        UpdateSchedule::new(TimeUnit::Days, 1).unwrap(),
    );
    (registry, scheduler)
}

#[tokio::test]
async fn scheduling_an_unknown_card_fails() {
    let (_registry, scheduler) = setup();

    let result = scheduler.schedule_from(
        at(12, 40, 10),
        "ghost",
        UpdateSchedule::new(TimeUnit::Hours, 1).unwrap(),
    );

    assert_eq!(result, Err(CardError::NotFound("ghost".to_string())));
}

#[tokio::test]
async fn coincident_schedules_share_one_bucket_and_fire_together() {
    // ARRANGE: two cards scheduled independently, both resolving to 13:00
    // after truncation.
    let (registry, scheduler) = setup();
    registry.create("x").unwrap();
    registry.create("y").unwrap();
    let hourly = UpdateSchedule::new(TimeUnit::Hours, 1).unwrap();
    scheduler.schedule_from(at(12, 40, 10), "x", hourly).unwrap();
    scheduler.schedule_from(at(12, 5, 0), "y", hourly).unwrap();

    let bucket = scheduler.active_schedule_for(at(13, 0, 0));
    assert_eq!(bucket.len(), 2);
    assert!(bucket.contains("x") && bucket.contains("y"));

    // ACT: one firing services the whole bucket.
    scheduler.run_due_bucket(at(13, 0, 0));

    // ASSERT: both escalated, the fired bucket is gone, and both members
    // re-entered the next hourly bucket.
    assert_eq!(registry.get("x").unwrap().priority(), CardPriority::Overdue);
    assert_eq!(registry.get("y").unwrap().priority(), CardPriority::Overdue);
    assert!(scheduler.active_schedule_for(at(13, 0, 0)).is_empty());
    let next = scheduler.active_schedule_for(at(14, 0, 0));
    assert!(next.contains("x") && next.contains("y"));
}

#[tokio::test]
async fn distinct_bucket_times_fire_independently() {
    let (registry, scheduler) = setup();
    registry.create("hourly").unwrap();
    registry.create("daily").unwrap();
    scheduler
        .schedule_from(at(12, 40, 10), "hourly", UpdateSchedule::new(TimeUnit::Hours, 1).unwrap())
        .unwrap();
    scheduler
        .schedule_from(at(12, 40, 10), "daily", UpdateSchedule::new(TimeUnit::Days, 1).unwrap())
        .unwrap();

    scheduler.run_due_bucket(at(13, 0, 0));

    assert_eq!(
        registry.get("hourly").unwrap().priority(),
        CardPriority::Overdue
    );
    assert_eq!(
        registry.get("daily").unwrap().priority(),
        CardPriority::Normal
    );
}

#[tokio::test]
async fn members_of_a_shared_bucket_keep_their_own_cadence() {
    // "fast" joins the 13:00 bucket via a minute schedule, "slow" via an
    // hourly one; after the firing each re-arms on its own cadence.
    let (registry, scheduler) = setup();
    registry.create("fast").unwrap();
    registry.create("slow").unwrap();
    scheduler
        .schedule_from(at(12, 59, 30), "fast", UpdateSchedule::new(TimeUnit::Minutes, 1).unwrap())
        .unwrap();
    scheduler
        .schedule_from(at(12, 40, 10), "slow", UpdateSchedule::new(TimeUnit::Hours, 1).unwrap())
        .unwrap();

    scheduler.run_due_bucket(at(13, 0, 0));

    assert!(scheduler.active_schedule_for(at(13, 1, 0)).contains("fast"));
    assert!(scheduler.active_schedule_for(at(14, 0, 0)).contains("slow"));
}

#[tokio::test]
async fn removed_card_is_dropped_silently_and_never_rearmed() {
    let (registry, scheduler) = setup();
    registry.create("doomed").unwrap();
    registry.create("kept").unwrap();
    let hourly = UpdateSchedule::new(TimeUnit::Hours, 1).unwrap();
    scheduler.schedule_from(at(12, 40, 10), "doomed", hourly).unwrap();
    scheduler.schedule_from(at(12, 40, 10), "kept", hourly).unwrap();

    // Removal does not cancel the pending timer; the firing tolerates it.
    registry.remove("doomed");
    scheduler.run_due_bucket(at(13, 0, 0));

    assert_eq!(registry.get("kept").unwrap().priority(), CardPriority::Overdue);
    let next = scheduler.active_schedule_for(at(14, 0, 0));
    assert!(next.contains("kept"));
    assert!(!next.contains("doomed"));
}

#[tokio::test]
async fn firing_an_empty_timestamp_is_a_no_op() {
    let (registry, scheduler) = setup();
    registry.create("x").unwrap();

    scheduler.run_due_bucket(at(3, 0, 0));

    assert_eq!(registry.get("x").unwrap().priority(), CardPriority::Normal);
}

#[tokio::test]
async fn escalation_cycle_is_perpetual_across_firings() {
    let (registry, scheduler) = setup();
    registry.create("x").unwrap();
    scheduler
        .schedule_from(at(12, 40, 10), "x", UpdateSchedule::new(TimeUnit::Hours, 1).unwrap())
        .unwrap();

    // Three cycles: escalation saturates at the ceiling but the card keeps
    // being re-armed.
    scheduler.run_due_bucket(at(13, 0, 0));
    scheduler.run_due_bucket(at(14, 0, 0));
    scheduler.run_due_bucket(at(15, 0, 0));

    assert_eq!(registry.get("x").unwrap().priority(), CardPriority::Critical);
    assert!(scheduler.active_schedule_for(at(16, 0, 0)).contains("x"));
}

#[tokio::test(start_paused = true)]
async fn armed_timer_fires_and_escalates_without_manual_firing() {
    let (registry, scheduler) = setup();
    registry.create("x").unwrap();
    scheduler
        .schedule_with("x", UpdateSchedule::new(TimeUnit::Seconds, 1).unwrap())
        .unwrap();

    // Paused tokio time auto-advances through the armed sleeps; five virtual
    // seconds cover several one-second cycles.
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;

    assert_eq!(registry.get("x").unwrap().priority(), CardPriority::Critical);
}
