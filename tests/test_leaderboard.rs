use std::fs;

use runner_game::error::GameError;
use runner_game::leaderboard::*;

fn entry(name: &str, score: u32) -> NewEntry {
    NewEntry {
        player_name: name.to_string(),
        character_id: "1".to_string(),
        score,
        distance: score as f32 * 2.0,
    }
}

// ── Leaderboard ───────────────────────────────────────────────────────────────

#[test]
fn entries_sorted_by_score_descending() {
    let mut board = Leaderboard::new();
    board.add(entry("a", 50));
    board.add(entry("b", 200));
    board.add(entry("c", 120));

    let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![200, 120, 50]);
    assert_eq!(board.best_score(), Some(200));
}

#[test]
fn add_reports_rank() {
    let mut board = Leaderboard::new();
    assert_eq!(board.add(entry("a", 10)), Some(0));
    assert_eq!(board.add(entry("b", 30)), Some(0));
    assert_eq!(board.add(entry("c", 20)), Some(1));
}

#[test]
fn only_top_ten_kept() {
    let mut board = Leaderboard::new();
    for score in 1..=12 {
        board.add(entry("p", score * 10));
    }
    assert_eq!(board.len(), MAX_ENTRIES);
    assert_eq!(board.entries().last().unwrap().score, 30);

    // Too low to make the board
    assert_eq!(board.add(entry("low", 5)), None);
    assert_eq!(board.len(), MAX_ENTRIES);
}

#[test]
fn ties_keep_earlier_entry_first() {
    let mut board = Leaderboard::new();
    board.add(entry("first", 100));
    board.add(entry("second", 100));
    assert_eq!(board.entries()[0].player_name, "first");
    assert_eq!(board.entries()[1].player_name, "second");
}

#[test]
fn entry_ids_stay_unique_on_a_full_board() {
    let mut board = Leaderboard::new();
    for score in 0..25 {
        board.add(entry("x", score));
    }
    assert_eq!(board.len(), MAX_ENTRIES);
    let mut ids: Vec<&str> = board.entries().iter().map(|e| e.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), MAX_ENTRIES);
}

#[test]
fn rank_is_correct_when_board_is_full() {
    let mut board = Leaderboard::new();
    for _ in 0..MAX_ENTRIES {
        board.add(entry("filler", 1));
    }
    assert_eq!(board.add(entry("a", 1000)), Some(0));
    assert_eq!(board.add(entry("b", 500)), Some(1));
    assert_eq!(board.entries()[1].player_name, "b");
    assert_eq!(board.add(entry("tie", 1)), None);
    assert_eq!(board.len(), MAX_ENTRIES);
}

// ── SaveData ──────────────────────────────────────────────────────────────────

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("save.json");

    let mut data = SaveData::default();
    data.player_name = "Mina".to_string();
    data.leaderboard.add(entry("Mina", 321));
    data.save_to(&path).unwrap();

    let loaded = SaveData::load_from(&path).unwrap();
    assert_eq!(loaded, data);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let data = SaveData::load_or_default(&dir.path().join("absent.json"));
    assert_eq!(data.player_name, DEFAULT_PLAYER_NAME);
    assert!(data.leaderboard.is_empty());
}

#[test]
fn corrupt_file_is_a_parse_error_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        SaveData::load_from(&path),
        Err(GameError::Parse { .. })
    ));
    assert!(SaveData::load_or_default(&path).leaderboard.is_empty());
}

#[test]
fn loaded_board_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let mut rows = Vec::new();
    for score in 0..15u32 {
        rows.push(format!(
            r#"{{"id":"{score}","player_name":"p","character_id":"1","score":{score},"distance":0.0,"recorded_at":0}}"#
        ));
    }
    fs::write(
        &path,
        format!(r#"{{"player_name":"p","leaderboard":[{}]}}"#, rows.join(",")),
    )
    .unwrap();

    let data = SaveData::load_from(&path).unwrap();
    assert_eq!(data.leaderboard.len(), MAX_ENTRIES);
    assert_eq!(data.leaderboard.best_score(), Some(14));
}

#[test]
fn partial_save_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, r#"{"player_name":"Solo"}"#).unwrap();

    let data = SaveData::load_from(&path).unwrap();
    assert_eq!(data.player_name, "Solo");
    assert!(data.leaderboard.is_empty());
}
