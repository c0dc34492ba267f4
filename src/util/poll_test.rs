use super::*;

#[test]
fn default_slot_is_inactive() {
    let slot = PollSlot::default();
    assert!(!slot.is_active());
}

#[test]
fn started_token_is_current() {
    let mut slot = PollSlot::default();
    let token = slot.start();
    assert!(slot.is_active());
    assert!(slot.is_current(token));
}

#[test]
fn restart_replaces_previous_loop() {
    let mut slot = PollSlot::default();
    let first = slot.start();
    let second = slot.start();
    assert!(!slot.is_current(first));
    assert!(slot.is_current(second));
}

#[test]
fn stop_invalidates_running_token() {
    let mut slot = PollSlot::default();
    let token = slot.start();
    slot.stop();
    assert!(!slot.is_active());
    assert!(!slot.is_current(token));
}

#[test]
fn stop_is_idempotent_and_restart_after_stop_works() {
    let mut slot = PollSlot::default();
    let old = slot.start();
    slot.stop();
    slot.stop();
    let fresh = slot.start();
    assert!(!slot.is_current(old));
    assert!(slot.is_current(fresh));
}

#[test]
fn tokens_from_a_stopped_generation_stay_dead_after_restart() {
    let mut slot = PollSlot::default();
    let a = slot.start();
    slot.stop();
    let b = slot.start();
    assert_ne!(a, b);
    assert!(!slot.is_current(a));
}

#[test]
fn current_reports_running_token_only() {
    let mut slot = PollSlot::default();
    assert_eq!(slot.current(), None);
    let token = slot.start();
    assert_eq!(slot.current(), Some(token));
    slot.stop();
    assert_eq!(slot.current(), None);
}
