use std::{sync::Arc, time::Duration};

use countdown_timer::{
    services::{KeyValueStore, MemoryStore, RandomPicker, PHRASES, USERNAME_KEY},
    state::{AppState, CountdownController, Phase, TimerConfig},
};

fn controller_with(store: Arc<MemoryStore>) -> CountdownController {
    CountdownController::new(TimerConfig::default(), store, Box::new(RandomPicker))
}

#[test]
fn three_second_countdown_completes_with_message() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()));
    controller.configure(3);
    controller.start();
    for _ in 0..3 {
        controller.tick();
    }

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, Phase::Completed);
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.completion_count, 1);

    let message = snapshot.message.expect("message after completion");
    assert!(!message.is_empty());
    assert!(PHRASES.iter().any(|phrase| message.contains(phrase)));
}

#[test]
fn reset_midway_returns_to_idle_without_counting() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()));
    controller.configure(5);
    controller.start();
    controller.tick();
    controller.tick();
    controller.reset();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.remaining_seconds, 5);
    assert_eq!(snapshot.completion_count, 0);
}

#[test]
fn completion_message_addresses_username_or_guest() {
    let store = Arc::new(MemoryStore::new());
    let mut controller = controller_with(store.clone());
    controller.configure(1);

    controller.set_username("dan");
    controller.start();
    controller.tick();
    assert!(controller.message().unwrap().ends_with("dan!"));
    assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("dan"));

    controller.set_username("");
    controller.start();
    controller.tick();
    assert!(controller.message().unwrap().ends_with("Guest!"));
}

#[test]
fn username_survives_a_new_controller() {
    let store = Arc::new(MemoryStore::new());
    controller_with(store.clone()).set_username("Amina");

    let controller = controller_with(store);
    assert_eq!(controller.username(), "Amina");
}

#[tokio::test(start_paused = true)]
async fn rapid_double_start_decrements_once_per_second() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()));
    controller.configure(10);
    let state = Arc::new(AppState::new(controller, 0, "127.0.0.1".to_string()));

    state.start().unwrap();
    state.start().unwrap();

    // Sample half a period away from tick boundaries
    tokio::time::sleep(Duration::from_millis(500)).await;
    for expected in [9, 8, 7] {
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(state.snapshot().unwrap().remaining_seconds, expected);
    }
}
