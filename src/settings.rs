//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use crate::game::{GameConfig, default_spawn, spawn_fits};
use crate::queue::Randomizer;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const MIN_SIDE: usize = 4;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub gameplay: GameplaySettings,
}

/// Board geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub width: usize,
    pub height: usize,
    /// Spawn anchor; top centre when unset
    pub spawn_x: Option<i32>,
    pub spawn_y: Option<i32>,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Gravity interval in milliseconds
    pub fall_interval_ms: u64,
    /// Points per cleared line
    pub line_award: u64,
    pub randomizer: Randomizer,
    pub hold_once_per_drop: bool,
    /// Fixed RNG seed; a random one per run when unset
    pub seed: Option<u64>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            width: config.width,
            height: config.height,
            spawn_x: None,
            spawn_y: None,
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            fall_interval_ms: config.fall_interval.as_millis() as u64,
            line_award: config.line_award,
            randomizer: config.randomizer,
            hold_once_per_drop: config.hold_once_per_drop,
            seed: None,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default location, or defaults when there is no file
    pub fn load() -> Result<Self, SettingsError> {
        match Self::settings_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            toml::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn spawn(&self) -> (i32, i32) {
        let (x, y) = default_spawn(self.board.width, self.board.height);
        (self.board.spawn_x.unwrap_or(x), self.board.spawn_y.unwrap_or(y))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let BoardSettings { width, height, .. } = self.board;
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(SettingsError::Invalid(format!(
                "board must be at least {MIN_SIDE}x{MIN_SIDE}, got {width}x{height}"
            )));
        }
        let (x, y) = self.spawn();
        if !spawn_fits(width, height, (x, y)) {
            return Err(SettingsError::Invalid(format!(
                "pieces spawned at ({x}, {y}) do not fit the {width}x{height} board"
            )));
        }
        if self.gameplay.fall_interval_ms == 0 {
            return Err(SettingsError::Invalid(
                "fall_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the session config; `seed` is used when none is configured
    pub fn to_config(&self, seed: u64) -> GameConfig {
        GameConfig {
            width: self.board.width,
            height: self.board.height,
            spawn: self.spawn(),
            fall_interval: Duration::from_millis(self.gameplay.fall_interval_ms),
            line_award: self.gameplay.line_award,
            randomizer: self.gameplay.randomizer,
            seed: self.gameplay.seed.unwrap_or(seed),
            hold_once_per_drop: self.gameplay.hold_once_per_drop,
        }
    }
}
