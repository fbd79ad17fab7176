//! Top-10 leaderboard and the small save file it lives in.
//!
//! Save data is JSON in the user's local data directory.  A missing or
//! unreadable file never stops the game; it just means an empty board.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GameError, Result};

/// Maximum number of entries kept.
pub const MAX_ENTRIES: usize = 10;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Details of a finished run, before it gets an id and timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntry {
    pub player_name: String,
    pub character_id: String,
    pub score: u32,
    pub distance: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub player_name: String,
    pub character_id: String,
    pub score: u32,
    pub distance: f32,
    /// Seconds since the Unix epoch.
    pub recorded_at: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, best score first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Record a run.  Returns the 0-based rank it landed at, or `None` if it
    /// fell off the bottom of the board.
    pub fn add(&mut self, entry: NewEntry) -> Option<usize> {
        // Ties rank below earlier runs.
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= MAX_ENTRIES {
            return None;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let id = self.unused_id(now.as_millis());

        self.entries.insert(
            rank,
            LeaderboardEntry {
                id,
                player_name: entry.player_name,
                character_id: entry.character_id,
                score: entry.score,
                distance: entry.distance,
                recorded_at: now.as_secs(),
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// `"{millis}-{n}"` with the smallest `n` not already on the board.
    fn unused_id(&self, millis: u128) -> String {
        (0u32..)
            .map(|n| format!("{}-{}", millis, n))
            .find(|id| self.entries.iter().all(|e| &e.id != id))
            .unwrap_or_default()
    }

    /// Restore invariants on data read from disk.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

/// Everything that survives between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub player_name: String,
    pub leaderboard: Leaderboard,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            leaderboard: Leaderboard::default(),
        }
    }
}

impl SaveData {
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("runner_game").join("save.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut data: SaveData = serde_json::from_str(&text).map_err(|source| GameError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        data.leaderboard.normalize();
        Ok(data)
    }

    /// Like `load_from`, but a missing or broken file yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No save file at {:?}, starting fresh", path);
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(data) => {
                info!(
                    "Loaded save data from {:?} ({} leaderboard entries)",
                    path,
                    data.leaderboard.len()
                );
                data
            }
            Err(e) => {
                warn!("Ignoring unreadable save file: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GameError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| GameError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved leaderboard to {:?}", path);
        Ok(())
    }
}
