//! Input intents.
//!
//! Front ends translate key presses, taps and swipes into `Intent`s and feed
//! them to an `IntentSource`.  An intent reads as active for a short window
//! after it fires and then clears itself; the game loop reacts to the
//! rising edge.

use std::collections::HashMap;
use std::time::Duration;

/// How long a directional intent stays active.
pub const DIRECTION_WINDOW: Duration = Duration::from_millis(500);
/// How long an action intent stays active.
pub const ACTION_WINDOW: Duration = Duration::from_millis(100);
/// Gestures shorter than this are taps, not swipes.
pub const SWIPE_THRESHOLD: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl Intent {
    pub fn window(self) -> Duration {
        match self {
            Intent::Action => ACTION_WINDOW,
            _ => DIRECTION_WINDOW,
        }
    }

    /// Classify a drag by its displacement.  `y` grows downward.  Returns
    /// `None` for movements below `SWIPE_THRESHOLD`.
    pub fn from_swipe(dx: f32, dy: f32) -> Option<Intent> {
        if (dx * dx + dy * dy).sqrt() <= SWIPE_THRESHOLD {
            return None;
        }
        let angle = dy.atan2(dx).to_degrees();
        let intent = if angle > -45.0 && angle < 45.0 {
            Intent::Right
        } else if (45.0..135.0).contains(&angle) {
            Intent::Down
        } else if !(-135.0..135.0).contains(&angle) {
            Intent::Left
        } else {
            Intent::Up
        };
        Some(intent)
    }
}

/// Boolean view of every intent at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub action: bool,
}

impl Intents {
    pub fn with(mut self, intent: Intent) -> Self {
        match intent {
            Intent::Up => self.up = true,
            Intent::Down => self.down = true,
            Intent::Left => self.left = true,
            Intent::Right => self.right = true,
            Intent::Action => self.action = true,
        }
        self
    }

    /// Intents set here but not in `previous`.
    pub fn rising_from(&self, previous: &Intents) -> Intents {
        Intents {
            up: self.up && !previous.up,
            down: self.down && !previous.down,
            left: self.left && !previous.left,
            right: self.right && !previous.right,
            action: self.action && !previous.action,
        }
    }
}

/// Tracks when each intent last fired.
#[derive(Clone, Debug, Default)]
pub struct IntentSource {
    fired_at: HashMap<Intent, Duration>,
}

impl IntentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `intent` at `now`.  Re-firing while it is still active does not
    /// extend the window.
    pub fn trigger(&mut self, intent: Intent, now: Duration) {
        if !self.is_active(intent, now) {
            let _ = self.fired_at.insert(intent, now);
        }
    }

    pub fn is_active(&self, intent: Intent, now: Duration) -> bool {
        self.fired_at
            .get(&intent)
            .map(|&at| now.saturating_sub(at) < intent.window())
            .unwrap_or(false)
    }

    /// Drop expired intents and report the rest.
    pub fn snapshot(&mut self, now: Duration) -> Intents {
        self.fired_at
            .retain(|&intent, &mut at| now.saturating_sub(at) < intent.window());
        self.fired_at
            .keys()
            .fold(Intents::default(), |acc, &intent| acc.with(intent))
    }

    pub fn clear(&mut self) {
        self.fired_at.clear();
    }
}
