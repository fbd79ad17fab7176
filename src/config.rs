//! Runtime configuration.  Every field has a default so a partial JSON file
//! (or none at all) is enough to start a game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compute::TICKS_PER_SECOND;
use crate::entities::Viewport;
use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation width in screen-space units.
    pub viewport_width: f32,
    /// Simulation height in screen-space units.
    pub viewport_height: f32,
    pub tick_rate: u32,
    /// Overrides the name stored in the save file.
    pub player_name: Option<String>,
    pub character_id: String,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    /// Save file location; the platform data directory when unset.
    pub save_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            tick_rate: TICKS_PER_SECOND,
            player_name: None,
            character_id: "1".to_string(),
            seed: None,
            save_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text).map_err(|source| GameError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GameError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    pub fn validate(self) -> Result<Self> {
        let dims_ok = self.viewport_width.is_finite()
            && self.viewport_height.is_finite()
            && self.viewport_width > 0.0
            && self.viewport_height > 0.0;
        if !dims_ok {
            return Err(GameError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !(1..=240).contains(&self.tick_rate) {
            return Err(GameError::InvalidConfig(format!(
                "tick_rate must be within 1..=240, got {}",
                self.tick_rate
            )));
        }
        if crate::catalog::character(&self.character_id).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "unknown character id {:?}",
                self.character_id
            )));
        }
        Ok(self)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }
}
