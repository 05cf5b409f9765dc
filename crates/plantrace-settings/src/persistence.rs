//! Settings Persistence
//!
//! Locates, loads, and saves the editor configuration file.
//! A missing file is not an error: the factory defaults are used until the
//! first save.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "plantrace";
const CONFIG_FILE: &str = "settings.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Platform config location, e.g. `~/.config/plantrace/settings.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_or_default(&Self::default_path()?)
    }

    /// Load settings from `path`, or use defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        let config = if path.exists() {
            let config = Config::load_from_file(path)?;
            tracing::info!("Loaded settings from {}", path.display());
            config
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self {
            config,
            path: path.to_path_buf(),
        })
    }

    /// Save settings, creating the parent directory if needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        self.config.save_to_file(&self.path)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Path the settings are saved to
    pub fn path(&self) -> &Path {
        &self.path
    }
}
