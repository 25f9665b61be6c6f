//! Global Constants
//!
//! Centralized constants for protocol ranges and service tuning.
//! All magic numbers should be defined here with documentation.

/// Service name reported by `GET /api/health`
pub const SERVICE_NAME: &str = "nateos-mgmt-api";

/// Network/listener constants
pub mod network {
    /// Default listen address for the management API
    pub const DEFAULT_LISTEN: &str = "0.0.0.0";

    /// Default listen port for the management API
    pub const DEFAULT_PORT: u16 = 8080;

    /// Default base URL used by the CLI client
    pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";
}

/// VLAN constants (IEEE 802.1Q)
pub mod vlan {
    /// Lowest assignable VLAN id
    pub const ID_MIN: i64 = 1;

    /// Highest assignable VLAN id (4095 is reserved)
    pub const ID_MAX: i64 = 4094;

    /// Maximum length of a VLAN name
    pub const NAME_MAX_LEN: usize = 32;
}

/// Spanning tree constants
pub mod stp {
    /// Bridge priority range (increments of 4096)
    pub const PRIORITY_MIN: i64 = 0;
    pub const PRIORITY_MAX: i64 = 61440;

    /// Hello time range (seconds)
    pub const HELLO_TIME_MIN: i64 = 1;
    pub const HELLO_TIME_MAX: i64 = 10;

    /// Forward delay range (seconds)
    pub const FORWARD_DELAY_MIN: i64 = 4;
    pub const FORWARD_DELAY_MAX: i64 = 30;

    /// Max age range (seconds)
    pub const MAX_AGE_MIN: i64 = 6;
    pub const MAX_AGE_MAX: i64 = 40;
}

/// LLDP constants
pub mod lldp {
    /// Transmit interval range (seconds)
    pub const TX_INTERVAL_MIN: i64 = 5;
    pub const TX_INTERVAL_MAX: i64 = 32768;

    /// Hold multiplier range
    pub const HOLD_MULTIPLIER_MIN: i64 = 2;
    pub const HOLD_MULTIPLIER_MAX: i64 = 10;
}

/// BGP constants
pub mod bgp {
    /// Autonomous system number range (4-byte ASNs, 0 reserved)
    pub const ASN_MIN: i64 = 1;
    pub const ASN_MAX: i64 = 4_294_967_295;
}

/// Interface constants
pub mod interface {
    /// MTU range (bytes); lower bound is the IPv4 minimum link MTU
    pub const MTU_MIN: i64 = 68;
    pub const MTU_MAX: i64 = 9216;

    /// Maximum length of an interface description
    pub const DESCRIPTION_MAX_LEN: usize = 240;
}

/// Routing constants
pub mod route {
    /// Administrative distance range
    pub const DISTANCE_MIN: i64 = 1;
    pub const DISTANCE_MAX: i64 = 255;
}

/// System identity constants
pub mod system {
    /// Maximum hostname length per RFC 1035 label rules
    pub const HOSTNAME_MAX_LEN: usize = 63;
}

/// Layer-4 constants
pub mod l4 {
    /// TCP/UDP port range
    pub const PORT_MIN: i64 = 0;
    pub const PORT_MAX: i64 = 65535;
}

/// VRRP constants
pub mod vrrp {
    /// Virtual router id range
    pub const VRID_MIN: i64 = 1;
    pub const VRID_MAX: i64 = 255;

    /// Priority range (255 is reserved for the address owner)
    pub const PRIORITY_MIN: i64 = 1;
    pub const PRIORITY_MAX: i64 = 254;
}
