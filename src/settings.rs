//! Player settings and preferences
//!
//! Persisted as JSON under the platform config directory. Missing or
//! malformed files fall back to defaults; missing fields take their default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::StoreError;
use crate::sim::{Difficulty, Viewport};

/// Directory name under the platform config/data dirs
pub const APP_DIR: &str = "bubble-pop";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty used when a game starts
    pub difficulty: Difficulty,
    /// Viewport size handed to `resize` before the first game
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Tick cap for the headless demo
    pub demo_max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            viewport_width: DEFAULT_WIDTH,
            viewport_height: DEFAULT_HEIGHT,
            seed: None,
            demo_max_ticks: 60 * 60 * 10,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// Default settings file location
    pub fn path() -> Result<PathBuf, StoreError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(Self::FILE_NAME))
            .ok_or(StoreError::NoDataDir("settings"))
    }

    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                return Self::default();
            }
        };

        if !path.exists() {
            log::info!("No settings at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save to the default location, logging failures
    pub fn save(&self) {
        match Self::path().and_then(|path| self.save_to(&path).map(|()| path)) {
            Ok(path) => log::info!("Settings saved to {:?}", path),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
