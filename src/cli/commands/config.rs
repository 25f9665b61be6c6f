//! Config Command
//!
//! Inspect the effective daemon settings (merged from defaults, file, env).

use std::path::Path;

use crate::settings::SettingsLoader;
use crate::types::{MgmtError, Result};

/// Show the effective settings after the full resolution chain
pub fn show(config_file: Option<&Path>, as_json: bool) -> Result<()> {
    let settings = SettingsLoader::load(config_file)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!(
            "{}",
            toml::to_string_pretty(&settings).map_err(|e| MgmtError::Config(e.to_string()))?
        );
    }

    Ok(())
}

/// Show where settings are read from
pub fn path(config_file: Option<&Path>) {
    let file = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(SettingsLoader::default_config_path);
    let exists = if file.exists() { "✓" } else { "✗" };

    println!("Settings sources:");
    println!();
    println!("  File: {} {}", exists, file.display());
    println!("  Env:  NATEOS_MGMT_* (LISTEN, PORT, REFERENCE_POLICY)");
}
