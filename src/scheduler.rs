//! Fixed-rate tick driver.
//!
//! The driver turns elapsed wall-clock time into a whole number of ticks.
//! It only runs while the session is playing; stopping it throws away any
//! partial tick so a resumed game picks up from a clean tick boundary.

use std::time::Duration;

use tracing::debug;

use crate::entities::GameStatus;

/// Upper bound on ticks produced by one `advance` call.  Anything beyond
/// this is dropped rather than replayed.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Clone, Debug)]
pub struct TickDriver {
    step: Duration,
    accumulator: Duration,
    running: bool,
}

impl TickDriver {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = Duration::ZERO;
            debug!("Tick driver started");
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.accumulator = Duration::ZERO;
            debug!("Tick driver stopped");
        }
    }

    /// Run while `status` is `Playing`, stay stopped otherwise.
    pub fn sync(&mut self, status: GameStatus) {
        if status == GameStatus::Playing {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Feed elapsed time; returns how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_CATCH_UP_TICKS {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
