// tests/today_service_test.rs

use std::sync::Arc;

use cardtrack::config::CardtrackConfig;
use cardtrack::domain::{CardPriority, TimeUnit};
use cardtrack::error::CardError;
use cardtrack::registry::{CardRegistry, InMemoryCardRegistry};
use cardtrack::state::AppState;
use cardtrack::today::{InMemoryTodayService, TodayService};

fn setup(max_cards_for_today: usize) -> (Arc<InMemoryCardRegistry>, InMemoryTodayService) {
    let registry = Arc::new(InMemoryCardRegistry::new());
    let today = InMemoryTodayService::new(registry.clone(), max_cards_for_today);
    (registry, today)
}

#[test]
fn daily_workflow_scenario() {
    // ARRANGE: four cards, a cap of two.
    let (registry, today) = setup(2);
    for title in ["a", "b", "c", "d"] {
        registry.create(title).unwrap();
    }
    registry.increase_priority("a").unwrap();

    // ACT: refill picks the two highest-priority titles.
    today.refill();
    assert_eq!(today.list(), ["a", "b"]);

    // Completing a listed card removes it and bottoms its priority.
    today.complete("a").unwrap();
    assert_eq!(today.list(), ["b"]);
    assert_eq!(registry.get("a").unwrap().priority(), CardPriority::Normal);

    // Completing a card that is not on the list fails.
    assert_eq!(
        today.complete("z"),
        Err(CardError::NotFound("z".to_string()))
    );
}

#[test]
fn every_permutation_of_the_list_reshuffles_exactly() {
    let (registry, today) = setup(3);
    for title in ["a", "b", "c"] {
        registry.create(title).unwrap();
    }
    today.refill();

    let permutations = [
        ["a", "b", "c"],
        ["a", "c", "b"],
        ["b", "a", "c"],
        ["b", "c", "a"],
        ["c", "a", "b"],
        ["c", "b", "a"],
    ];
    for perm in permutations {
        let order: Vec<String> = perm.iter().map(|s| s.to_string()).collect();
        today.reshuffle(order.clone()).unwrap();
        assert_eq!(today.list(), order);
    }
}

#[test]
fn failed_reshuffles_leave_the_list_untouched() {
    let (registry, today) = setup(3);
    for title in ["a", "b", "c"] {
        registry.create(title).unwrap();
    }
    today.refill();
    let before = today.list();

    assert_eq!(
        today.reshuffle(vec!["a".into(), "b".into(), "b".into()]),
        Err(CardError::DuplicateTitle("b".to_string()))
    );
    assert_eq!(
        today.reshuffle(vec!["a".into(), "b".into(), "z".into()]),
        Err(CardError::NotFound("z".to_string()))
    );
    assert_eq!(today.list(), before);
}

#[test]
fn extra_cards_stack_past_the_cap_until_the_next_refill() {
    let (registry, today) = setup(2);
    for title in ["a", "b", "c", "d"] {
        registry.create(title).unwrap();
    }
    today.refill();
    today.add_extra("c").unwrap();
    today.add_extra("d").unwrap();
    assert_eq!(today.list(), ["a", "b", "c", "d"]);

    // The cap governs automatic refill only.
    today.refill();
    assert_eq!(today.list().len(), 2);
}

#[tokio::test]
async fn create_tracked_card_registers_and_schedules() {
    // The composed adapter flow: create + default scheduling in one call.
    let config = CardtrackConfig {
        max_cards_for_today: 5,
        refill_interval_secs: 60,
        default_update_unit: TimeUnit::Days,
        default_update_period: 1,
        log_level: "info".to_string(),
    };
    let state = AppState::new(&config);

    state.create_tracked_card("pay rent").unwrap();

    assert!(state.registry.exists("pay rent"));
    assert_eq!(
        state.create_tracked_card("pay rent"),
        Err(CardError::AlreadyExists("pay rent".to_string()))
    );
    state.today.refill();
    assert_eq!(state.today.list(), ["pay rent"]);
}
