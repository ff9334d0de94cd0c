//! Game settings
//!
//! Stored as JSON next to the leaderboards. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_ATTEMPTS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the per-tier leaderboard files
    pub data_dir: PathBuf,
    /// In-range guesses allowed per round
    pub max_attempts: u32,
    /// Print the hidden number when a round starts
    pub reveal_target: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reveal_target: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it doesn't exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        settings.max_attempts = settings.max_attempts.max(1);
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path` as pretty JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write settings {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
