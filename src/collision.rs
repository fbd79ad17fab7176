//! Collision and combat resolution, plus perk pickup.
//!
//! `resolve_collisions` runs once per tick after movement.  It works over the
//! registry as it stands at that moment: an enemy or projectile removed
//! earlier in the pass is never checked again.

use tracing::{debug, info};

use crate::catalog::PerkKind;
use crate::compute::World;
use crate::entities::{GameStatus, Registry};
use crate::session::{BossDamage, GameStore, StageAdvance};

/// Health lost per unshielded enemy contact.
pub const CONTACT_DAMAGE: i32 = 10;
/// Awarded for every projectile that hits an enemy, fatal or not.
pub const ENEMY_HIT_SCORE: u32 = 10;
pub const BOSS_HIT_SCORE: u32 = 20;
/// Perks farther than this from the player cannot be picked up.
pub const PERK_PICKUP_RADIUS: f32 = 100.0;

/// What happened during one collision pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies that touched the player (each one is consumed).
    pub player_contacts: u32,
    /// Contacts that actually cost health.
    pub player_damaged: u32,
    pub projectile_hits: u32,
    pub enemies_destroyed: u32,
    pub boss_hits: u32,
    /// Set when the boss went down during this pass.
    pub boss_defeated: Option<StageAdvance>,
}

pub fn resolve_collisions(world: &mut World, store: &mut GameStore) -> CollisionReport {
    let mut report = CollisionReport::default();
    let hitbox = world.player.hitbox();
    let shielded = store.state().has_perk(PerkKind::Shield);

    let Registry {
        enemies,
        projectiles,
        boss,
        ..
    } = &mut world.registry;
    let mut spent = vec![false; projectiles.len()];

    // ── Player / projectiles ↔ enemies ────────────────────────────────────────
    enemies.retain_mut(|enemy| {
        if store.status() != GameStatus::Playing {
            return true;
        }

        if hitbox.overlaps(&enemy.bounds) {
            report.player_contacts += 1;
            if !shielded {
                report.player_damaged += 1;
                store.update_health(-CONTACT_DAMAGE);
            }
            return false;
        }

        for (i, projectile) in projectiles.iter().enumerate() {
            if spent[i] || !projectile.bounds.overlaps(&enemy.bounds) {
                continue;
            }
            spent[i] = true;
            enemy.health -= projectile.damage;
            report.projectile_hits += 1;
            store.update_score(ENEMY_HIT_SCORE);
            if enemy.health <= 0 {
                report.enemies_destroyed += 1;
                return false;
            }
        }
        true
    });

    // ── Projectiles ↔ boss ────────────────────────────────────────────────────
    if let Some(boss_bounds) = boss.as_ref().map(|b| b.bounds) {
        for (i, projectile) in projectiles.iter().enumerate() {
            if store.status() != GameStatus::Playing {
                break;
            }
            if spent[i] || !projectile.bounds.overlaps(&boss_bounds) {
                continue;
            }
            spent[i] = true;
            report.boss_hits += 1;
            store.update_score(BOSS_HIT_SCORE);
            match store.update_boss_health(-projectile.damage) {
                BossDamage::Defeated(advance) => {
                    report.boss_defeated = Some(advance);
                    *boss = None;
                    break;
                }
                BossDamage::Damaged(health) => debug!("Boss hit, {} health left", health),
                BossDamage::Inactive => {}
            }
        }
    }

    let mut index = 0;
    projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });

    report
}

/// React to an action intent: activate the perk nearest the player if it is
/// within `PERK_PICKUP_RADIUS`.
pub fn pickup_nearest_perk(world: &mut World, store: &mut GameStore) -> Option<PerkKind> {
    let (px, py) = (world.player.x, world.player.y);
    let (index, distance) = world
        .registry
        .perks
        .iter()
        .enumerate()
        .map(|(i, perk)| {
            let dx = perk.bounds.x - px;
            let dy = perk.bounds.y - py;
            (i, (dx * dx + dy * dy).sqrt())
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    if distance >= PERK_PICKUP_RADIUS {
        debug!("Nearest perk is {:.0} away, out of reach", distance);
        return None;
    }

    let perk = world.registry.perks.remove(index);
    store.add_perk(perk.kind);
    info!("Activated perk {}", perk.kind.id());
    Some(perk.kind)
}
