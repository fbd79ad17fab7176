//! Player position and the four timed actions.
//!
//! Each action is started by an intent and expires on its own after a fixed
//! duration.  Expiry is measured against the caller's clock, so actions keep
//! resolving even while the tick driver is stopped (e.g. paused).

use std::time::Duration;

use crate::entities::{Rect, Viewport};

/// Each half of a jump (rise, then fall).
pub const JUMP_PHASE: Duration = Duration::from_millis(300);
pub const CROUCH_DURATION: Duration = Duration::from_millis(500);
pub const DASH_DURATION: Duration = Duration::from_millis(500);
pub const AVOID_DURATION: Duration = Duration::from_millis(500);
/// Horizontal shift applied by a dash (and, negated, by an avoid).
pub const DASH_OFFSET: f32 = 50.0;

pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 60.0;
pub const CROUCH_HEIGHT: f32 = 40.0;

/// Which actions are currently running.  Any combination is possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionFlags {
    pub jumping: bool,
    pub crouching: bool,
    pub dashing: bool,
    pub avoiding: bool,
}

impl ActionFlags {
    pub fn is_idle(&self) -> bool {
        !(self.jumping || self.crouching || self.dashing || self.avoiding)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    base_x: f32,
    base_y: f32,
    jump_peak_y: f32,
    jump_started: Option<Duration>,
    crouch_until: Option<Duration>,
    dash_until: Option<Duration>,
    avoid_until: Option<Duration>,
}

impl Player {
    /// Idle player at the left-quarter baseline, vertically centred.
    pub fn new(viewport: Viewport) -> Self {
        let base_x = viewport.width / 4.0;
        let base_y = viewport.height / 2.0;
        Self {
            x: base_x,
            y: base_y,
            base_x,
            base_y,
            jump_peak_y: viewport.height / 3.0,
            jump_started: None,
            crouch_until: None,
            dash_until: None,
            avoid_until: None,
        }
    }

    pub fn base_x(&self) -> f32 {
        self.base_x
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    pub fn flags(&self) -> ActionFlags {
        ActionFlags {
            jumping: self.jump_started.is_some(),
            crouching: self.crouch_until.is_some(),
            dashing: self.dash_until.is_some(),
            avoiding: self.avoid_until.is_some(),
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_started.is_some()
    }

    pub fn is_crouching(&self) -> bool {
        self.crouch_until.is_some()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_until.is_some()
    }

    pub fn is_avoiding(&self) -> bool {
        self.avoid_until.is_some()
    }

    /// Collision box; shorter while crouching.
    pub fn hitbox(&self) -> Rect {
        let height = if self.is_crouching() {
            CROUCH_HEIGHT
        } else {
            PLAYER_HEIGHT
        };
        Rect::new(self.x, self.y, PLAYER_WIDTH, height)
    }

    // ── Action triggers ───────────────────────────────────────────────────────
    //
    // Each returns `false` (and changes nothing) while the same action is
    // still running.

    pub fn jump(&mut self, now: Duration) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.jump_started = Some(now);
        true
    }

    pub fn crouch(&mut self, now: Duration) -> bool {
        if self.is_crouching() {
            return false;
        }
        self.crouch_until = Some(now + CROUCH_DURATION);
        true
    }

    pub fn dash(&mut self, now: Duration) -> bool {
        if self.is_dashing() {
            return false;
        }
        self.x += DASH_OFFSET;
        self.dash_until = Some(now + DASH_DURATION);
        true
    }

    pub fn avoid(&mut self, now: Duration) -> bool {
        if self.is_avoiding() {
            return false;
        }
        self.x -= DASH_OFFSET;
        self.avoid_until = Some(now + AVOID_DURATION);
        true
    }

    // ── Deferred resolution ───────────────────────────────────────────────────

    /// Advance running actions to `now`: move along the jump arc and clear
    /// anything whose time is up.
    pub fn update(&mut self, now: Duration) {
        if let Some(started) = self.jump_started {
            let t = now.saturating_sub(started);
            if t >= JUMP_PHASE * 2 {
                self.y = self.base_y;
                self.jump_started = None;
            } else {
                let rise = self.jump_peak_y - self.base_y;
                let progress = if t < JUMP_PHASE {
                    t.as_secs_f32() / JUMP_PHASE.as_secs_f32()
                } else {
                    2.0 - t.as_secs_f32() / JUMP_PHASE.as_secs_f32()
                };
                self.y = self.base_y + rise * progress;
            }
        }

        if self.crouch_until.is_some_and(|until| now >= until) {
            self.crouch_until = None;
        }

        // Either expiry snaps x back to the baseline, even if the other
        // shift is still running.
        if self.dash_until.is_some_and(|until| now >= until) {
            self.dash_until = None;
            self.x = self.base_x;
        }
        if self.avoid_until.is_some_and(|until| now >= until) {
            self.avoid_until = None;
            self.x = self.base_x;
        }
    }
}
