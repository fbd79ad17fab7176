//! The authoritative game session.
//!
//! `GameStore` owns the session values and the leaderboard and only changes
//! them through the named operations below.  Callers get read-only access to
//! the current `SessionState`.

use tracing::{debug, info};

use crate::catalog::{self, BossInfo, Character, PerkKind, Stage};
use crate::entities::GameStatus;
use crate::leaderboard::{Leaderboard, NewEntry, SaveData};

pub const MAX_HEALTH: i32 = 100;
pub const BOSS_MAX_HEALTH: i32 = 100;

/// Snapshot of one session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub status: GameStatus,
    pub score: u32,
    pub distance: f32,
    /// Index into the stage list.
    pub stage: usize,
    /// Always within `0..=MAX_HEALTH`.
    pub health: i32,
    /// Activation order; the same perk may appear more than once.
    pub active_perks: Vec<PerkKind>,
    /// `Some` whenever `boss_active` is set.
    pub boss_health: Option<i32>,
    pub boss_active: bool,
}

impl SessionState {
    pub fn has_perk(&self, kind: PerkKind) -> bool {
        self.active_perks.contains(&kind)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: GameStatus::Ready,
            score: 0,
            distance: 0.0,
            stage: 0,
            health: MAX_HEALTH,
            active_perks: Vec::new(),
            boss_health: None,
            boss_active: false,
        }
    }
}

/// Result of `advance_stage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAdvance {
    /// Playing continues at this stage index.
    Next(usize),
    /// The last stage was cleared.
    Victory,
}

/// Result of `update_boss_health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossDamage {
    /// No boss was active; nothing changed.
    Inactive,
    /// Boss survives with this much health.
    Damaged(i32),
    Defeated(StageAdvance),
}

#[derive(Debug)]
pub struct GameStore {
    state: SessionState,
    stages: &'static [Stage],
    leaderboard: Leaderboard,
    player_name: String,
    selected_character: Option<&'static Character>,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self::with_stages(catalog::STAGES)
    }

    /// A store running through a custom stage list.
    pub fn with_stages(stages: &'static [Stage]) -> Self {
        let save = SaveData::default();
        Self {
            state: SessionState::default(),
            stages,
            leaderboard: save.leaderboard,
            player_name: save.player_name,
            selected_character: None,
        }
    }

    /// A store seeded from persisted data.
    pub fn from_save(save: SaveData) -> Self {
        Self {
            leaderboard: save.leaderboard,
            player_name: save.player_name,
            ..Self::new()
        }
    }

    pub fn save_data(&self) -> SaveData {
        SaveData {
            player_name: self.player_name.clone(),
            leaderboard: self.leaderboard.clone(),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn selected_character(&self) -> Option<&'static Character> {
        self.selected_character
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn current_stage(&self) -> Option<&'static Stage> {
        self.stages.get(self.state.stage)
    }

    pub fn current_boss(&self) -> Option<&'static BossInfo> {
        self.current_stage().and_then(Stage::boss)
    }

    // ── Profile ───────────────────────────────────────────────────────────────

    pub fn select_character(&mut self, character: &'static Character) {
        debug!("Selected character {} ({})", character.name, character.id);
        self.selected_character = Some(character);
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.to_string();
    }

    // ── Status transitions ────────────────────────────────────────────────────

    /// Begin a fresh session.  Only valid from `Ready`.
    pub fn start_game(&mut self) -> bool {
        if self.state.status != GameStatus::Ready {
            debug!("start_game ignored in {:?}", self.state.status);
            return false;
        }
        self.state = SessionState {
            status: GameStatus::Playing,
            ..SessionState::default()
        };
        info!("Session started");
        true
    }

    pub fn pause_game(&mut self) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }
        self.state.status = GameStatus::Paused;
        info!("Session paused");
        true
    }

    pub fn resume_game(&mut self) -> bool {
        if self.state.status != GameStatus::Paused {
            return false;
        }
        self.state.status = GameStatus::Playing;
        info!("Session resumed");
        true
    }

    /// Record the run on the leaderboard and switch to `GameOver`.  Does
    /// nothing unless a game is in progress.
    pub fn end_game(&mut self) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }
        let character_id = self
            .selected_character
            .map_or("unknown", |c| c.id)
            .to_string();
        let rank = self.add_to_leaderboard(NewEntry {
            player_name: self.player_name.clone(),
            character_id,
            score: self.state.score,
            distance: self.state.distance,
        });
        self.state.status = GameStatus::GameOver;
        info!(
            "Game over: score {} distance {:.0} rank {:?}",
            self.state.score, self.state.distance, rank
        );
        true
    }

    /// Back to the initial values, from any status.
    pub fn reset_game(&mut self) {
        self.state = SessionState::default();
        info!("Session reset");
    }

    // ── Counters ──────────────────────────────────────────────────────────────

    pub fn update_score(&mut self, points: u32) {
        self.state.score = self.state.score.saturating_add(points);
    }

    /// Negative or non-finite deltas are ignored; distance never shrinks.
    pub fn update_distance(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.state.distance += delta;
        }
    }

    /// Apply a health change, clamped to `0..=MAX_HEALTH`.  Reaching zero
    /// ends the game.
    pub fn update_health(&mut self, delta: i32) {
        let health = self.state.health.saturating_add(delta).clamp(0, MAX_HEALTH);
        self.state.health = health;
        if health == 0 {
            self.end_game();
        }
    }

    // ── Perks ─────────────────────────────────────────────────────────────────

    pub fn add_perk(&mut self, kind: PerkKind) {
        self.state.active_perks.push(kind);
    }

    /// Removes every stacked copy of `kind`.
    pub fn remove_perk(&mut self, kind: PerkKind) {
        self.state.active_perks.retain(|&k| k != kind);
    }

    // ── Boss & stages ─────────────────────────────────────────────────────────

    /// Start the current stage's boss fight.  Skipped (returns `false`) when
    /// a boss is already up or the stage has no boss configured.
    pub fn activate_boss(&mut self) -> bool {
        if self.state.boss_active {
            return false;
        }
        let Some(boss) = self.current_boss() else {
            debug!("No boss configured for stage {}, skipping", self.state.stage);
            return false;
        };
        self.state.boss_active = true;
        self.state.boss_health = Some(BOSS_MAX_HEALTH);
        info!("Boss {} activated on stage {}", boss.name, self.state.stage);
        true
    }

    /// Apply damage (negative delta) to the active boss.  A boss brought to
    /// zero is deactivated and the stage advances.
    pub fn update_boss_health(&mut self, delta: i32) -> BossDamage {
        if !self.state.boss_active {
            return BossDamage::Inactive;
        }
        let current = self.state.boss_health.unwrap_or(BOSS_MAX_HEALTH);
        let health = current.saturating_add(delta).clamp(0, BOSS_MAX_HEALTH);
        if health > 0 {
            self.state.boss_health = Some(health);
            return BossDamage::Damaged(health);
        }
        self.state.boss_health = Some(0);
        self.state.boss_active = false;
        info!("Boss defeated on stage {}", self.state.stage);
        BossDamage::Defeated(self.advance_stage())
    }

    /// Move to the next stage, keeping only the score.  Past the last stage
    /// the session ends in `Victory`.
    pub fn advance_stage(&mut self) -> StageAdvance {
        let score = self.state.score;
        let next = self.state.stage + 1;
        if next >= self.stages.len() {
            self.state = SessionState {
                status: GameStatus::Victory,
                score,
                stage: self.state.stage,
                ..SessionState::default()
            };
            info!("Victory with score {}", score);
            return StageAdvance::Victory;
        }
        self.state = SessionState {
            status: GameStatus::Playing,
            score,
            stage: next,
            ..SessionState::default()
        };
        info!("Advanced to stage {}", next);
        StageAdvance::Next(next)
    }

    // ── Leaderboard ───────────────────────────────────────────────────────────

    pub fn add_to_leaderboard(&mut self, entry: NewEntry) -> Option<usize> {
        self.leaderboard.add(entry)
    }
}
