//! Configuration Sections
//!
//! The closed set of configuration sections and their data shapes.
//!
//! Every section has one of three shapes:
//!
//! - **Keyed map**: records addressed by a domain key (interface name, VLAN id)
//! - **Ordered list**: records addressed by position, evaluated in list order
//! - **Singleton**: exactly one record for the whole subsystem
//!
//! The section set is fixed at startup; access to any other name fails with
//! `SectionNotFound`. No section is ever created implicitly.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::error::MgmtError;

/// A single configuration record: a flat JSON object with typed fields
pub type Record = serde_json::Map<String, Value>;

/// A consistent deep copy of every section, taken at one logical instant
pub type ConfigSnapshot = BTreeMap<SectionName, SectionData>;

// =============================================================================
// Section Names
// =============================================================================

/// The closed set of configuration sections
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Interfaces,
    Vlans,
    Stp,
    Lacp,
    Lldp,
    IgmpSnooping,
    StaticRoutes,
    Ospf,
    Bgp,
    Vrrp,
    Qos,
    Acl,
    Span,
    System,
    Aaa,
}

/// All sections, in snapshot order
pub const ALL_SECTIONS: [SectionName; 15] = [
    SectionName::Interfaces,
    SectionName::Vlans,
    SectionName::Stp,
    SectionName::Lacp,
    SectionName::Lldp,
    SectionName::IgmpSnooping,
    SectionName::StaticRoutes,
    SectionName::Ospf,
    SectionName::Bgp,
    SectionName::Vrrp,
    SectionName::Qos,
    SectionName::Acl,
    SectionName::Span,
    SectionName::System,
    SectionName::Aaa,
];

impl SectionName {
    /// Wire name of the section (snake_case, as stored and served)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interfaces => "interfaces",
            Self::Vlans => "vlans",
            Self::Stp => "stp",
            Self::Lacp => "lacp",
            Self::Lldp => "lldp",
            Self::IgmpSnooping => "igmp_snooping",
            Self::StaticRoutes => "static_routes",
            Self::Ospf => "ospf",
            Self::Bgp => "bgp",
            Self::Vrrp => "vrrp",
            Self::Qos => "qos",
            Self::Acl => "acl",
            Self::Span => "span",
            Self::System => "system",
            Self::Aaa => "aaa",
        }
    }

    /// Shape of this section's data
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Interfaces | Self::Vlans | Self::Lacp => SectionKind::KeyedMap,
            Self::StaticRoutes | Self::Acl => SectionKind::OrderedList,
            _ => SectionKind::Singleton,
        }
    }

    /// For keyed-map sections created through a collection POST: the record
    /// field that supplies the map key (VLANs are keyed by `vlan_id`)
    pub fn key_field(&self) -> Option<&'static str> {
        match self {
            Self::Vlans => Some("vlan_id"),
            _ => None,
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = MgmtError;

    /// Parse a wire section name. URL-style hyphens are accepted in place of
    /// underscores (`igmp-snooping` == `igmp_snooping`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        ALL_SECTIONS
            .into_iter()
            .find(|section| section.as_str() == normalized)
            .ok_or_else(|| MgmtError::SectionNotFound(s.to_string()))
    }
}

// =============================================================================
// Section Shapes
// =============================================================================

/// The three shapes a section can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Records addressed by a domain key
    KeyedMap,
    /// Records addressed by position; order encodes evaluation priority
    OrderedList,
    /// Exactly one record
    Singleton,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyedMap => write!(f, "keyed-map"),
            Self::OrderedList => write!(f, "ordered-list"),
            Self::Singleton => write!(f, "singleton"),
        }
    }
}

/// Section contents, shaped per [`SectionKind`].
///
/// Serializes untagged: keyed maps and singletons as JSON objects, ordered
/// lists as JSON arrays, matching the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    /// Keyed-map section contents
    Map(BTreeMap<String, Record>),
    /// Ordered-list section contents
    List(Vec<Record>),
    /// Singleton section contents
    Record(Record),
}

impl SectionData {
    /// Empty contents of the given shape
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::KeyedMap => Self::Map(BTreeMap::new()),
            SectionKind::OrderedList => Self::List(Vec::new()),
            SectionKind::Singleton => Self::Record(Record::new()),
        }
    }

    /// Shape of this data
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Map(_) => SectionKind::KeyedMap,
            Self::List(_) => SectionKind::OrderedList,
            Self::Record(_) => SectionKind::Singleton,
        }
    }

    /// Keyed-map contents, if this is a keyed-map section
    pub fn as_map(&self) -> Option<&BTreeMap<String, Record>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Ordered-list contents, if this is a list section
    pub fn as_list(&self) -> Option<&Vec<Record>> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Singleton record, if this is a singleton section
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

// =============================================================================
// Merge Semantics
// =============================================================================

/// Field-level merge: fields present in `patch` replace the base value,
/// unspecified fields retain their prior value. Applying the same patch twice
/// is idempotent.
pub fn merge_records(base: &Record, patch: &Record) -> Record {
    let mut merged = base.clone();
    for (field, value) in patch {
        merged.insert(field.clone(), value.clone());
    }
    merged
}

// =============================================================================
// Tests
// =============================================================================
