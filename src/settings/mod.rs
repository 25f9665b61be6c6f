//! Daemon Settings
//!
//! Unified settings system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Config file (nateos-mgmt.toml)
//! 3. Environment variables (NATEOS_MGMT_*)
//! 4. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::Settings;
