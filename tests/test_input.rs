use std::time::Duration;

use runner_game::input::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn directional_intent_clears_after_500ms() {
    let mut src = IntentSource::new();
    src.trigger(Intent::Up, ms(0));
    assert!(src.snapshot(ms(499)).up);
    assert!(!src.snapshot(ms(500)).up);
    assert!(!src.is_active(Intent::Up, ms(500)));
}

#[test]
fn action_intent_clears_after_100ms() {
    let mut src = IntentSource::new();
    src.trigger(Intent::Action, ms(1000));
    assert!(src.is_active(Intent::Action, ms(1099)));
    assert!(!src.is_active(Intent::Action, ms(1100)));
}

#[test]
fn retrigger_while_active_does_not_extend_window() {
    let mut src = IntentSource::new();
    src.trigger(Intent::Right, ms(0));
    src.trigger(Intent::Right, ms(400));
    assert!(!src.is_active(Intent::Right, ms(500)));

    // Once expired it can fire again
    src.trigger(Intent::Right, ms(600));
    assert!(src.is_active(Intent::Right, ms(1000)));
}

#[test]
fn snapshot_reports_every_active_intent() {
    let mut src = IntentSource::new();
    src.trigger(Intent::Up, ms(0));
    src.trigger(Intent::Left, ms(0));
    src.trigger(Intent::Action, ms(0));
    let s = src.snapshot(ms(50));
    assert!(s.up && s.left && s.action);
    assert!(!s.down && !s.right);

    src.clear();
    assert_eq!(src.snapshot(ms(50)), Intents::default());
}

#[test]
fn rising_edges_only() {
    let prev = Intents::default().with(Intent::Up);
    let now = Intents::default().with(Intent::Up).with(Intent::Down);
    let raised = now.rising_from(&prev);
    assert!(!raised.up);
    assert!(raised.down);
}

#[test]
fn swipe_classification() {
    assert_eq!(Intent::from_swipe(100.0, 0.0), Some(Intent::Right));
    assert_eq!(Intent::from_swipe(-100.0, 0.0), Some(Intent::Left));
    assert_eq!(Intent::from_swipe(0.0, -100.0), Some(Intent::Up));
    assert_eq!(Intent::from_swipe(0.0, 100.0), Some(Intent::Down));
    assert_eq!(Intent::from_swipe(80.0, 30.0), Some(Intent::Right));
}

#[test]
fn short_drag_is_not_a_swipe() {
    assert_eq!(Intent::from_swipe(10.0, 10.0), None);
    assert_eq!(Intent::from_swipe(0.0, SWIPE_THRESHOLD), None);
}
