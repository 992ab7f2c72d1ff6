use masterblog_core::{CoreError, PreferenceError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Persisted client preferences. A single key today: the API base URL the
/// user last loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub api_base_url: Option<String>,
}

/// File-backed store for [`Preferences`]. Written as a side effect of the
/// load operation, read once at startup.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform config directory, e.g.
    /// `~/.config/masterblog/preferences.toml` on Linux.
    pub fn from_default_dir() -> Result<Self, CoreError> {
        let config_dir = dirs::config_dir().ok_or(PreferenceError::NoConfigDir)?;
        Ok(Self::new(config_dir.join("masterblog").join("preferences.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An absent file is not an error; it means nothing was saved yet and
    /// startup proceeds without an initial load.
    pub fn load(&self) -> Result<Preferences, CoreError> {
        if !self.path.exists() {
            debug!("No preference file at {}", self.path.display());
            return Ok(Preferences::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let preferences = toml::from_str(&raw).map_err(PreferenceError::Parse)?;

        debug!("Loaded preferences from {}", self.path.display());
        Ok(preferences)
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = toml::to_string_pretty(preferences).map_err(PreferenceError::Serialize)?;
        fs::write(&self.path, raw)?;

        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
