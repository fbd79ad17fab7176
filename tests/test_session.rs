use runner_game::catalog::{self, PerkKind, Stage};
use runner_game::entities::GameStatus;
use runner_game::leaderboard::{NewEntry, SaveData};
use runner_game::session::*;

static NO_BOSS: [Stage; 1] = [Stage {
    id: "void",
    name: "The Void",
    description: "",
    boss_id: "missing",
}];

fn playing_store() -> GameStore {
    let mut store = GameStore::new();
    store.select_character(catalog::character("2").unwrap());
    assert!(store.start_game());
    store
}

// ── Status transitions ────────────────────────────────────────────────────────

#[test]
fn new_store_is_ready_with_full_health() {
    let store = GameStore::new();
    let s = store.state();
    assert_eq!(s.status, GameStatus::Ready);
    assert_eq!(s.health, MAX_HEALTH);
    assert_eq!(s.score, 0);
    assert_eq!(s.distance, 0.0);
    assert_eq!(s.stage, 0);
    assert!(s.active_perks.is_empty());
    assert!(!s.boss_active);
    assert_eq!(s.boss_health, None);
}

#[test]
fn pause_and_resume_only_from_the_right_state() {
    let mut store = GameStore::new();
    assert!(!store.pause_game());
    assert!(!store.resume_game());

    store.start_game();
    assert!(!store.resume_game());
    assert!(store.pause_game());
    assert_eq!(store.status(), GameStatus::Paused);
    assert!(!store.pause_game());
    assert!(store.resume_game());
    assert_eq!(store.status(), GameStatus::Playing);
}

#[test]
fn start_is_rejected_outside_ready() {
    let mut store = playing_store();
    assert!(!store.start_game());
    store.end_game();
    assert!(!store.start_game(), "terminal states need a reset first");
    store.reset_game();
    assert!(store.start_game());
}

#[test]
fn reset_returns_to_initial_values() {
    let mut store = playing_store();
    store.update_score(500);
    store.update_distance(42.0);
    store.update_health(-30);
    store.add_perk(PerkKind::Shield);
    store.activate_boss();

    store.reset_game();
    let s = store.state();
    assert_eq!(s.status, GameStatus::Ready);
    assert_eq!(s.score, 0);
    assert_eq!(s.distance, 0.0);
    assert_eq!(s.health, MAX_HEALTH);
    assert!(s.active_perks.is_empty());
    assert!(!s.boss_active);
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[test]
fn distance_never_decreases() {
    let mut store = playing_store();
    store.update_distance(10.0);
    store.update_distance(-5.0);
    store.update_distance(f32::NAN);
    assert_eq!(store.state().distance, 10.0);
}

#[test]
fn score_saturates() {
    let mut store = playing_store();
    store.update_score(u32::MAX - 1);
    store.update_score(10);
    assert_eq!(store.state().score, u32::MAX);
}

#[test]
fn health_is_clamped_to_range() {
    let mut store = playing_store();
    store.update_health(50);
    assert_eq!(store.state().health, MAX_HEALTH);
    store.update_health(-30);
    assert_eq!(store.state().health, 70);
    store.update_health(-1000);
    assert_eq!(store.state().health, 0);
}

#[test]
fn health_reaching_zero_ends_game_with_leaderboard_entry() {
    let mut store = playing_store();
    store.update_score(120);
    store.update_distance(345.0);
    store.update_health(-100);

    assert_eq!(store.status(), GameStatus::GameOver);
    let entries = store.leaderboard().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score, 120);
    assert_eq!(entries[0].distance, 345.0);
    assert_eq!(entries[0].character_id, "2");
    assert_eq!(entries[0].player_name, store.player_name());
}

#[test]
fn end_game_only_records_once() {
    let mut store = playing_store();
    assert!(store.end_game());
    assert!(!store.end_game());
    store.update_health(-100);
    assert_eq!(store.leaderboard().len(), 1);
}

#[test]
fn end_game_without_character_records_unknown() {
    let mut store = GameStore::new();
    store.start_game();
    store.end_game();
    assert_eq!(store.leaderboard().entries()[0].character_id, "unknown");
}

// ── Perks ─────────────────────────────────────────────────────────────────────

#[test]
fn perks_stack_and_remove_together() {
    let mut store = playing_store();
    store.add_perk(PerkKind::RapidFire);
    store.add_perk(PerkKind::RapidFire);
    store.add_perk(PerkKind::Shield);
    assert_eq!(store.state().active_perks.len(), 3);
    assert!(store.state().has_perk(PerkKind::RapidFire));

    store.remove_perk(PerkKind::RapidFire);
    assert!(!store.state().has_perk(PerkKind::RapidFire));
    assert_eq!(store.state().active_perks, vec![PerkKind::Shield]);
}

// ── Boss & stages ─────────────────────────────────────────────────────────────

#[test]
fn activate_boss_sets_full_health_once() {
    let mut store = playing_store();
    assert!(store.activate_boss());
    assert!(store.state().boss_active);
    assert_eq!(store.state().boss_health, Some(BOSS_MAX_HEALTH));
    assert!(!store.activate_boss());
}

#[test]
fn activate_boss_skipped_without_boss_config() {
    let mut store = GameStore::with_stages(&NO_BOSS);
    store.start_game();
    assert!(store.current_boss().is_none());
    assert!(!store.activate_boss());
    assert!(!store.state().boss_active);
}

#[test]
fn boss_damage_without_active_boss_is_ignored() {
    let mut store = playing_store();
    assert_eq!(store.update_boss_health(-10), BossDamage::Inactive);
    assert_eq!(store.state().boss_health, None);
}

#[test]
fn boss_defeat_advances_stage_and_keeps_score() {
    let mut store = playing_store();
    store.update_score(300);
    store.update_distance(1500.0);
    store.update_health(-40);
    store.add_perk(PerkKind::PowerUp);
    store.activate_boss();

    assert_eq!(store.update_boss_health(-95), BossDamage::Damaged(5));
    assert_eq!(
        store.update_boss_health(-5),
        BossDamage::Defeated(StageAdvance::Next(1))
    );

    let s = store.state();
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.stage, 1);
    assert_eq!(s.score, 300);
    assert_eq!(s.distance, 0.0);
    assert_eq!(s.health, MAX_HEALTH);
    assert!(s.active_perks.is_empty());
    assert!(!s.boss_active);
    assert_eq!(store.current_stage().unwrap().id, "restaurant");
}

#[test]
fn clearing_last_stage_is_victory() {
    let mut store = playing_store();
    for _ in 0..store.stage_count() - 1 {
        assert!(matches!(store.advance_stage(), StageAdvance::Next(_)));
    }
    store.update_score(999);
    store.activate_boss();
    assert_eq!(
        store.update_boss_health(-200),
        BossDamage::Defeated(StageAdvance::Victory)
    );
    assert_eq!(store.status(), GameStatus::Victory);
    assert_eq!(store.state().score, 999);
    assert_eq!(store.state().stage, 2);
    assert!(store.leaderboard().is_empty());
}

// ── Persistence glue ──────────────────────────────────────────────────────────

#[test]
fn store_round_trips_save_data() {
    let mut store = GameStore::new();
    store.set_player_name("Ana");
    store.add_to_leaderboard(NewEntry {
        player_name: "Ana".to_string(),
        character_id: "3".to_string(),
        score: 77,
        distance: 10.0,
    });

    let save: SaveData = store.save_data();
    let restored = GameStore::from_save(save);
    assert_eq!(restored.player_name(), "Ana");
    assert_eq!(restored.leaderboard().best_score(), Some(77));
    assert_eq!(restored.status(), GameStatus::Ready);
}
