//! Game-loop logic.
//!
//! `World` is everything the loop owns for one session: the entity registry,
//! the player, and the per-frame counters.  The session values live in the
//! `GameStore` and are only touched through its operations.  All randomness
//! comes through an injected RNG and all timing through a caller-supplied
//! clock, so a run is fully reproducible in tests.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, trace};

use crate::catalog::PerkKind;
use crate::collision::{self, CollisionReport};
use crate::entities::{
    Boss, Enemy, EnemyKind, EntityId, GameStatus, Perk, Projectile, Rect, Registry, Viewport,
};
use crate::input::Intents;
use crate::player::Player;
use crate::session::{GameStore, SessionState};

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const TICKS_PER_SECOND: u32 = 60;

pub const INITIAL_SPEED: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.5;
pub const MAX_SPEED: f32 = 15.0;
/// Frames between speed increases (~5 s).
pub const SPEED_RAMP_INTERVAL: u64 = 300;

/// Frames between enemy spawns (~1 s).
pub const ENEMY_SPAWN_INTERVAL: u64 = 60;
/// Frames between perk spawns (~3 s).
pub const PERK_SPAWN_INTERVAL: u64 = 180;

/// Distance after which the stage boss shows up.
pub const BOSS_DISTANCE: f32 = 1000.0;
pub const BOSS_SIZE: f32 = 120.0;
/// Frames between boss shots.
pub const BOSS_ATTACK_INTERVAL: u64 = 90;
/// Full horizontal patrol cycle, in frames.
pub const BOSS_PATROL_X_PERIOD: u64 = 120;
/// Full vertical patrol cycle, in frames.
pub const BOSS_PATROL_Y_PERIOD: u64 = 180;

pub const AUTO_FIRE_COOLDOWN: Duration = Duration::from_millis(500);
/// Cooldown cut per shot while rapidfire is active.
pub const RAPIDFIRE_REDUCTION: Duration = Duration::from_millis(200);

pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_WIDTH: f32 = 20.0;
pub const POWERED_PROJECTILE_WIDTH: f32 = 30.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const PROJECTILE_DAMAGE: i32 = 1;
pub const POWERED_PROJECTILE_DAMAGE: i32 = 2;
/// Vertical offset of the doubleshoot companion shot.
pub const DOUBLE_SHOT_OFFSET: f32 = -30.0;
/// Shots leave the player this far right of its anchor.
pub const MUZZLE_OFFSET: f32 = 50.0;

pub const PERK_SIZE: f32 = 40.0;

/// How far past an edge an entity may drift before it is culled.
pub const OFFSCREEN_MARGIN: f32 = 100.0;

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    pub viewport: Viewport,
    pub registry: Registry,
    pub player: Player,
    /// Ticks run so far.
    pub frame: u64,
    /// Cosmetic scroll position, always within `0..viewport.width`.
    pub background_offset: f32,
    pub game_speed: f32,
    /// Clock reading of the last auto-fire, as adjusted by rapidfire.
    pub last_fire: Option<Duration>,
    /// Intents seen by the previous `handle_intents` call.
    pub intents: Intents,
    /// Stage whose boss could not be activated; not retried.
    pub boss_skipped_stage: Option<usize>,
}

/// Fresh world for a new session.
pub fn init_world(viewport: Viewport) -> World {
    World {
        viewport,
        registry: Registry::new(),
        player: Player::new(viewport),
        frame: 0,
        background_offset: 0.0,
        game_speed: INITIAL_SPEED,
        last_fire: None,
        intents: Intents::default(),
        boss_skipped_stage: None,
    }
}

/// Discard every entity after a stage is cleared.  Speed, frame count and
/// the player carry over.
pub fn reset_stage(world: &mut World) {
    world.registry.clear();
}

/// Outcome of one `tick`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// `false` when the session was not playing and nothing ran.
    pub ran: bool,
    pub collisions: CollisionReport,
    pub enemy_spawned: Option<EntityId>,
    pub perk_spawned: Option<EntityId>,
    pub boss_spawned: bool,
    pub shots_fired: u32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// React to the current intents.  Only newly raised intents do anything, and
/// only while playing.  Returns the perk picked up, if any.
pub fn handle_intents(
    world: &mut World,
    store: &mut GameStore,
    intents: Intents,
    now: Duration,
) -> Option<PerkKind> {
    let previous = std::mem::replace(&mut world.intents, intents);
    if store.status() != GameStatus::Playing {
        return None;
    }
    let raised = intents.rising_from(&previous);

    if raised.up {
        world.player.jump(now);
    }
    if raised.down {
        world.player.crouch(now);
    }
    if raised.right {
        world.player.dash(now);
    }
    if raised.left {
        world.player.avoid(now);
    }
    if raised.action {
        return collision::pickup_nearest_perk(world, store);
    }
    None
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing unless the session is
/// playing.  If the session stops playing partway (game over, victory) the
/// rest of the frame is skipped.
pub fn tick(
    world: &mut World,
    store: &mut GameStore,
    now: Duration,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();
    if store.status() != GameStatus::Playing {
        return report;
    }
    report.ran = true;

    world.frame += 1;
    let frame = world.frame;
    let speed = world.game_speed;

    // ── 1. Scroll & movement ─────────────────────────────────────────────────
    world.background_offset = (world.background_offset + speed) % world.viewport.width;
    move_entities(world);

    if world.registry.boss.is_some() {
        move_boss(world);
        if frame % BOSS_ATTACK_INTERVAL == 0 {
            spawn_boss_projectile(world);
        }
    }

    // ── 2. Collisions ────────────────────────────────────────────────────────
    report.collisions = collision::resolve_collisions(world, store);
    if report.collisions.boss_defeated.is_some() {
        reset_stage(world);
    }
    if store.status() != GameStatus::Playing {
        return report;
    }

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    let boss_active = store.state().boss_active;
    if frame % ENEMY_SPAWN_INTERVAL == 0 && !boss_active {
        report.enemy_spawned = Some(spawn_enemy(world, rng));
    }
    if frame % PERK_SPAWN_INTERVAL == 0 && !boss_active {
        report.perk_spawned = Some(spawn_perk(world, rng));
    }
    let stage = store.state().stage;
    if store.state().distance > BOSS_DISTANCE
        && !boss_active
        && world.registry.boss.is_none()
        && world.boss_skipped_stage != Some(stage)
    {
        if store.activate_boss() {
            spawn_boss(world, stage);
            report.boss_spawned = true;
        } else {
            world.boss_skipped_stage = Some(stage);
        }
    }

    // ── 4. Auto-fire ─────────────────────────────────────────────────────────
    let fire_ready = world
        .last_fire
        .map_or(true, |last| now.saturating_sub(last) >= AUTO_FIRE_COOLDOWN);
    if fire_ready {
        report.shots_fired = fire_projectiles(world, store.state());
        world.last_fire = Some(if store.state().has_perk(PerkKind::RapidFire) {
            now.saturating_sub(RAPIDFIRE_REDUCTION)
        } else {
            now
        });
    }

    // ── 5. Difficulty ramp & bookkeeping ─────────────────────────────────────
    if frame % SPEED_RAMP_INTERVAL == 0 {
        world.game_speed = (world.game_speed + SPEED_STEP).min(MAX_SPEED);
        info!("Game speed now {}", world.game_speed);
    }

    store.update_score(1);
    store.update_distance(world.game_speed);

    trace!(
        frame,
        entities = world.registry.len(),
        score = store.state().score,
        "tick"
    );
    report
}

/// Scroll enemies, projectiles and perks, culling whatever left the screen.
pub fn move_entities(world: &mut World) {
    let speed = world.game_speed;
    let right_limit = world.viewport.width + OFFSCREEN_MARGIN;
    let left_limit = -OFFSCREEN_MARGIN;
    let registry = &mut world.registry;

    for enemy in &mut registry.enemies {
        enemy.bounds.x -= speed + enemy.speed;
    }
    registry.enemies.retain(|e| e.bounds.x > left_limit);

    for projectile in &mut registry.projectiles {
        projectile.bounds.x += projectile.speed;
    }
    registry.projectiles.retain(|p| p.bounds.x < right_limit);

    for perk in &mut registry.perks {
        perk.bounds.x -= speed;
    }
    registry.perks.retain(|p| p.bounds.x > left_limit);
}

/// Patrol one step: drift left then right on one cycle, up then down on a
/// longer one, staying inside the right-hand band of the screen.
pub fn move_boss(world: &mut World) {
    let frame = world.frame;
    let Viewport { width, height } = world.viewport;
    let Some(boss) = world.registry.boss.as_mut() else {
        return;
    };

    boss.bounds.x = if frame % BOSS_PATROL_X_PERIOD < BOSS_PATROL_X_PERIOD / 2 {
        (boss.bounds.x - 1.0).max(width * 0.6)
    } else {
        (boss.bounds.x + 1.0).min(width * 0.8)
    };
    boss.bounds.y = if frame % BOSS_PATROL_Y_PERIOD < BOSS_PATROL_Y_PERIOD / 2 {
        (boss.bounds.y - 1.0).max(height * 0.2)
    } else {
        (boss.bounds.y + 1.0).min(height * 0.8)
    };
}

// ── Spawners ──────────────────────────────────────────────────────────────────

/// Vertical spawn position inside the middle 60% of the screen.
fn spawn_y(viewport: Viewport, rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() * (viewport.height * 0.6) + viewport.height * 0.2
}

pub fn spawn_enemy(world: &mut World, rng: &mut impl Rng) -> EntityId {
    let kind = *EnemyKind::SPAWNABLE
        .choose(rng)
        .unwrap_or(&EnemyKind::Small);
    let x = world.viewport.width + OFFSCREEN_MARGIN;
    let y = spawn_y(world.viewport, rng);
    spawn_enemy_at(world, kind, x, y)
}

/// Place an enemy of `kind` with its stock attributes.
pub fn spawn_enemy_at(world: &mut World, kind: EnemyKind, x: f32, y: f32) -> EntityId {
    let id = world.registry.allocate_id();
    let size = kind.size();
    world.registry.enemies.push(Enemy {
        id,
        kind,
        bounds: Rect::new(x, y, size, size),
        health: kind.health(),
        speed: kind.speed(),
    });
    id
}

pub fn spawn_boss_projectile(world: &mut World) -> Option<EntityId> {
    let origin = world.registry.boss.as_ref()?.bounds;
    Some(spawn_enemy_at(
        world,
        EnemyKind::BossProjectile,
        origin.x - 50.0,
        origin.y,
    ))
}

pub fn spawn_perk(world: &mut World, rng: &mut impl Rng) -> EntityId {
    let kind = *PerkKind::ALL.choose(rng).unwrap_or(&PerkKind::Shield);
    let x = world.viewport.width + OFFSCREEN_MARGIN;
    let y = spawn_y(world.viewport, rng);
    spawn_perk_at(world, kind, x, y)
}

pub fn spawn_perk_at(world: &mut World, kind: PerkKind, x: f32, y: f32) -> EntityId {
    let id = world.registry.allocate_id();
    world.registry.perks.push(Perk {
        id,
        kind,
        bounds: Rect::new(x, y, PERK_SIZE, PERK_SIZE),
    });
    id
}

/// Put the stage boss at its entry position, replacing any previous one.
pub fn spawn_boss(world: &mut World, stage: usize) -> EntityId {
    let id = world.registry.allocate_id();
    let Viewport { width, height } = world.viewport;
    world.registry.boss = Some(Boss {
        id,
        stage,
        bounds: Rect::new(width * 0.7, height / 2.0, BOSS_SIZE, BOSS_SIZE),
    });
    id
}

/// Fire one auto-fire volley from the player, shaped by the active perks.
/// Returns the number of projectiles created.
pub fn fire_projectiles(world: &mut World, session: &SessionState) -> u32 {
    let powered = session.has_perk(PerkKind::PowerUp);
    let (damage, width) = if powered {
        (POWERED_PROJECTILE_DAMAGE, POWERED_PROJECTILE_WIDTH)
    } else {
        (PROJECTILE_DAMAGE, PROJECTILE_WIDTH)
    };
    let x = world.player.x + MUZZLE_OFFSET;
    let y = world.player.y;

    let mut offsets = vec![0.0];
    if session.has_perk(PerkKind::DoubleShoot) {
        offsets.push(DOUBLE_SHOT_OFFSET);
    }

    for dy in &offsets {
        let id = world.registry.allocate_id();
        world.registry.projectiles.push(Projectile {
            id,
            bounds: Rect::new(x, y + dy, width, PROJECTILE_HEIGHT),
            speed: PROJECTILE_SPEED,
            damage,
        });
    }
    offsets.len() as u32
}
