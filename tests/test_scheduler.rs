use std::time::Duration;

use runner_game::entities::GameStatus;
use runner_game::scheduler::*;

#[test]
fn stopped_driver_produces_no_ticks() {
    let mut d = TickDriver::new(60);
    assert!(!d.is_running());
    assert_eq!(d.advance(Duration::from_secs(1)), 0);
}

#[test]
fn one_tick_per_step() {
    let mut d = TickDriver::new(60);
    d.start();
    let step = d.step();
    assert_eq!(d.advance(step), 1);
    assert_eq!(d.advance(step / 2), 0);
    assert_eq!(d.advance(step / 2), 1);
}

#[test]
fn catch_up_is_capped_and_excess_dropped() {
    let mut d = TickDriver::new(60);
    d.start();
    assert_eq!(d.advance(Duration::from_secs(1)), MAX_CATCH_UP_TICKS);
    // Nothing left over from the long stall
    assert_eq!(d.advance(Duration::ZERO), 0);
}

#[test]
fn stop_discards_partial_tick() {
    let mut d = TickDriver::new(60);
    d.start();
    let step = d.step();
    assert_eq!(d.advance(step * 3 / 4), 0);
    d.stop();
    d.start();
    assert_eq!(d.advance(step / 2), 0, "accumulated time must not replay");
}

#[test]
fn sync_follows_session_status() {
    let mut d = TickDriver::new(60);
    d.sync(GameStatus::Playing);
    assert!(d.is_running());
    for status in [
        GameStatus::Paused,
        GameStatus::GameOver,
        GameStatus::Victory,
        GameStatus::Ready,
    ] {
        d.sync(GameStatus::Playing);
        d.sync(status);
        assert!(!d.is_running(), "{:?} must stop the driver", status);
    }
}
