//! Launch settings
//!
//! Read from the JSON file named by `SPACE_JUNK_SETTINGS` when set; any
//! field left out keeps its default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_SPEED;
use crate::sim::Viewport;
use crate::tuning::GameVariant;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which game version to play
    pub variant: GameVariant,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Frames to simulate before the headless launcher exits
    pub frames: u64,
    /// Four-way movement speed (pixels per tick)
    pub player_speed: f32,
    pub viewport: Viewport,
    /// Directory holding `img/*.png`; without one the manifest is trusted
    pub asset_dir: Option<PathBuf>,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Print the final frame snapshot as JSON
    pub dump_snapshot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::Classic,
            seed: 0x5eed,
            frames: 60 * 60,
            player_speed: PLAYER_SPEED,
            viewport: Viewport::default(),
            asset_dir: None,
            autopilot: true,
            dump_snapshot: false,
        }
    }
}

/// Problems reading a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            SettingsError::Json(e) => write!(f, "invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "SPACE_JUNK_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Settings from `SPACE_JUNK_SETTINGS`, or defaults
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }
}
