//! All game entity types: pure data plus the shared AABB geometry.
//!
//! Every entity is a positioned axis-aligned rectangle carrying a few
//! per-type attributes.  Coordinates are screen-space units with the origin
//! at the top-left of the viewport; `x` grows rightward, `y` downward.

use crate::catalog::PerkKind;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Size of the simulated play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict overlap test.  Rectangles that only share an edge do not
    /// collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Unique per spawn for the lifetime of a `Registry`, including across
/// stage resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Small,
    Medium,
    Large,
    /// Fired by the boss; travels like an enemy and is consumed the same way.
    BossProjectile,
}

impl EnemyKind {
    /// Kinds the regular spawner picks from, uniformly.
    pub const SPAWNABLE: [EnemyKind; 3] = [EnemyKind::Small, EnemyKind::Medium, EnemyKind::Large];

    /// Side length of the (square) hitbox.
    pub fn size(self) -> f32 {
        match self {
            EnemyKind::Small => 30.0,
            EnemyKind::Medium => 50.0,
            EnemyKind::Large => 70.0,
            EnemyKind::BossProjectile => 40.0,
        }
    }

    pub fn health(self) -> i32 {
        match self {
            EnemyKind::Small => 1,
            EnemyKind::Medium => 2,
            EnemyKind::Large => 3,
            EnemyKind::BossProjectile => 1,
        }
    }

    /// Extra leftward speed on top of the scroll speed.
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Small => 3.0,
            EnemyKind::Medium => 2.0,
            EnemyKind::Large => 1.0,
            EnemyKind::BossProjectile => 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub bounds: Rect,
    pub health: i32,
    pub speed: f32,
}

// ── Projectiles, perks, boss ──────────────────────────────────────────────────

/// A player shot.  Damage is fixed at fire time.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub bounds: Rect,
    pub speed: f32,
    pub damage: i32,
}

/// A collectible perk drifting with the scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct Perk {
    pub id: EntityId,
    pub kind: PerkKind,
    pub bounds: Rect,
}

/// The stage boss.  Its health lives in the session store, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub id: EntityId,
    pub stage: usize,
    pub bounds: Rect,
}

/// Borrowed view over any registry entry, for consumers that treat every
/// entity alike (rendering, debugging).
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Enemy(&'a Enemy),
    Projectile(&'a Projectile),
    Perk(&'a Perk),
    Boss(&'a Boss),
}

impl EntityRef<'_> {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Enemy(e) => e.id,
            EntityRef::Projectile(p) => p.id,
            EntityRef::Perk(p) => p.id,
            EntityRef::Boss(b) => b.id,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Enemy(e) => e.bounds,
            EntityRef::Projectile(p) => p.bounds,
            EntityRef::Perk(p) => p.bounds,
            EntityRef::Boss(b) => b.bounds,
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// In-memory collections of every live entity, owned by the game loop.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub perks: Vec<Perk>,
    pub boss: Option<Boss>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh identifier.
    pub fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    /// Drop every entity.  The id counter keeps running so ids are never
    /// reused.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.perks.clear();
        self.boss = None;
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.projectiles.is_empty()
            && self.perks.is_empty()
            && self.boss.is_none()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
            + self.projectiles.len()
            + self.perks.len()
            + usize::from(self.boss.is_some())
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.enemies
            .iter()
            .map(EntityRef::Enemy)
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
            .chain(self.perks.iter().map(EntityRef::Perk))
            .chain(self.boss.iter().map(EntityRef::Boss))
    }
}

// ── Session status ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl GameStatus {
    /// `GameOver` and `Victory` only leave through an explicit reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }
}
