use runner_game::catalog::PerkKind;
use runner_game::entities::*;

fn enemy(registry: &mut Registry, kind: EnemyKind, x: f32, y: f32) -> Enemy {
    let size = kind.size();
    Enemy {
        id: registry.allocate_id(),
        kind,
        bounds: Rect::new(x, y, size, size),
        health: kind.health(),
        speed: kind.speed(),
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_detects_intersection() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn rect_touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let right = Rect::new(10.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 10.0, 10.0, 10.0);
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
}

#[test]
fn rect_containment_overlaps() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn rect_separated_on_one_axis_does_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(3.0, 50.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

// ── EnemyKind ─────────────────────────────────────────────────────────────────

#[test]
fn enemy_kind_attributes() {
    assert_eq!(EnemyKind::Small.size(), 30.0);
    assert_eq!(EnemyKind::Medium.size(), 50.0);
    assert_eq!(EnemyKind::Large.size(), 70.0);
    assert_eq!(EnemyKind::BossProjectile.size(), 40.0);

    assert_eq!(EnemyKind::Small.health(), 1);
    assert_eq!(EnemyKind::Medium.health(), 2);
    assert_eq!(EnemyKind::Large.health(), 3);

    // Bigger enemies are slower
    assert!(EnemyKind::Small.speed() > EnemyKind::Medium.speed());
    assert!(EnemyKind::Medium.speed() > EnemyKind::Large.speed());
}

#[test]
fn boss_projectile_is_not_randomly_spawnable() {
    assert!(!EnemyKind::SPAWNABLE.contains(&EnemyKind::BossProjectile));
    assert_eq!(EnemyKind::SPAWNABLE.len(), 3);
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[test]
fn registry_ids_are_unique_and_increasing() {
    let mut r = Registry::new();
    let a = r.allocate_id();
    let b = r.allocate_id();
    let c = r.allocate_id();
    assert!(a < b && b < c);
}

#[test]
fn registry_clear_keeps_id_counter() {
    let mut r = Registry::new();
    let e = enemy(&mut r, EnemyKind::Small, 0.0, 0.0);
    let before = e.id;
    r.enemies.push(e);
    r.clear();
    assert!(r.is_empty());
    let after = r.allocate_id();
    assert!(after > before, "ids must not be reused after a clear");
}

#[test]
fn registry_len_and_entities_cover_every_collection() {
    let mut r = Registry::new();
    assert!(r.is_empty());
    assert_eq!(r.len(), 0);

    let e = enemy(&mut r, EnemyKind::Medium, 10.0, 10.0);
    r.enemies.push(e);
    let pid = r.allocate_id();
    r.projectiles.push(Projectile {
        id: pid,
        bounds: Rect::new(0.0, 0.0, 20.0, 10.0),
        speed: 10.0,
        damage: 1,
    });
    let kid = r.allocate_id();
    r.perks.push(Perk {
        id: kid,
        kind: PerkKind::Shield,
        bounds: Rect::new(0.0, 0.0, 40.0, 40.0),
    });
    let bid = r.allocate_id();
    r.boss = Some(Boss {
        id: bid,
        stage: 0,
        bounds: Rect::new(0.0, 0.0, 120.0, 120.0),
    });

    assert!(!r.is_empty());
    assert_eq!(r.len(), 4);

    let ids: Vec<EntityId> = r.entities().map(|e| e.id()).collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.contains(&pid));
    assert!(ids.contains(&kid));
    assert!(ids.contains(&bid));

    let boss_bounds = r
        .entities()
        .find(|e| matches!(e, EntityRef::Boss(_)))
        .map(|e| e.bounds());
    assert_eq!(boss_bounds, Some(Rect::new(0.0, 0.0, 120.0, 120.0)));
}

#[test]
fn registry_clone_is_independent() {
    let mut original = Registry::new();
    let e = enemy(&mut original, EnemyKind::Large, 5.0, 5.0);
    original.enemies.push(e);

    let mut cloned = original.clone();
    cloned.enemies[0].health = 0;
    cloned.enemies.clear();

    assert_eq!(original.enemies.len(), 1);
    assert_eq!(original.enemies[0].health, 3);
}

// ── GameStatus ────────────────────────────────────────────────────────────────

#[test]
fn only_game_over_and_victory_are_terminal() {
    assert!(GameStatus::GameOver.is_terminal());
    assert!(GameStatus::Victory.is_terminal());
    assert!(!GameStatus::Ready.is_terminal());
    assert!(!GameStatus::Playing.is_terminal());
    assert!(!GameStatus::Paused.is_terminal());
}
