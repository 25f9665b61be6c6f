//! Settings Loader (Figment-based)
//!
//! Loads and merges daemon settings from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Config file (nateos-mgmt.toml, or the path passed on the CLI)
//! 3. Environment variables (NATEOS_MGMT_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Settings;
use crate::types::{MgmtError, Result};

/// Settings loader
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with the full resolution chain:
    /// defaults → config file → env vars
    pub fn load(config_file: Option<&Path>) -> Result<Settings> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            debug!("Loading settings from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else if config_file.is_some() {
            return Err(MgmtError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        // NATEOS_MGMT_PORT -> port, NATEOS_MGMT_REFERENCE_POLICY -> reference_policy
        figment = figment.merge(Env::prefixed("NATEOS_MGMT_").lowercase(true));

        let settings: Settings = figment
            .extract()
            .map_err(|e| MgmtError::Config(format!("Settings error: {}", e)))?;

        settings.validate()?;

        Ok(settings)
    }

    /// Default config file location, next to the working directory
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("nateos-mgmt.toml")
    }
}
