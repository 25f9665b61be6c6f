//! Settings Types
//!
//! Daemon settings with sensible defaults. All fields are flat so environment
//! overrides map one-to-one (`NATEOS_MGMT_PORT` -> `port`).

use serde::{Deserialize, Serialize};

use crate::constants::network;
use crate::store::ReferencePolicy;
use crate::types::MgmtError;

/// Root settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the API server binds to
    pub listen: String,

    /// TCP port the API server binds to
    pub port: u16,

    /// How deletes of referenced records are handled
    pub reference_policy: ReferencePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: network::DEFAULT_LISTEN.to_string(),
            port: network::DEFAULT_PORT,
            reference_policy: ReferencePolicy::default(),
        }
    }
}

impl Settings {
    /// Validate settings values are usable.
    /// Returns `MgmtError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.port == 0 {
            return Err(MgmtError::Config(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.listen.parse::<std::net::IpAddr>().is_err() {
            return Err(MgmtError::Config(format!(
                "listen must be an IP address, got '{}'",
                self.listen
            )));
        }

        Ok(())
    }

    /// The socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
        assert_eq!(settings.reference_policy, ReferencePolicy::Deny);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let settings = Settings {
            port: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_listen_address() {
        let settings = Settings {
            listen: "not-an-ip".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
