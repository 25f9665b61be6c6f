//! Section Schema
//!
//! Declares, per section, its shape and field rules, and exposes the single
//! validation entry point used by the store.
//!
//! Validation is pure and side-effect free: cross-section references are
//! checked against a [`CrossRefs`] snapshot supplied by the caller, never
//! against the live store, so validation is deterministic under concurrency.

pub mod fields;
pub mod sections;

use std::collections::BTreeSet;

use serde_json::json;

use crate::types::{ConfigSnapshot, Record, SectionData, SectionName, ValidationError};

// =============================================================================
// Cross-Section References
// =============================================================================

/// Snapshot of the referenced sections a record may point into.
///
/// Built by the store inside the same critical section as the write, so there
/// is no gap between checking a reference and committing the record.
#[derive(Debug, Clone, Default)]
pub struct CrossRefs {
    /// VLAN ids currently defined in the `vlans` section
    pub vlan_ids: BTreeSet<i64>,
}

impl CrossRefs {
    /// Collect references from a configuration snapshot
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        let mut refs = Self::default();
        if let Some(SectionData::Map(vlans)) = snapshot.get(&SectionName::Vlans) {
            refs.vlan_ids = vlans.keys().filter_map(|key| key.parse().ok()).collect();
        }
        refs
    }
}

// =============================================================================
// Validation Entry Point
// =============================================================================

/// Validate one candidate record for `section`.
///
/// `key` is the map key for keyed-map sections (used for key/field consistency
/// and key injection, e.g. VLANs). The returned record is normalized: decoded
/// through the section's typed schema and re-serialized.
pub fn validate(
    section: SectionName,
    key: Option<&str>,
    record: &Record,
    refs: &CrossRefs,
) -> Result<Record, ValidationError> {
    match section {
        SectionName::Interfaces => sections::validate_interface(record, refs),
        SectionName::Vlans => sections::validate_vlan(key, record),
        SectionName::Lacp => sections::validate_lacp(record),
        SectionName::Stp => sections::validate_stp(record),
        SectionName::Lldp => sections::validate_lldp(record),
        SectionName::IgmpSnooping => sections::validate_igmp_snooping(record),
        SectionName::StaticRoutes => sections::validate_static_route(record),
        SectionName::Ospf => sections::validate_ospf(record),
        SectionName::Bgp => sections::validate_bgp(record),
        SectionName::Vrrp => sections::validate_vrrp(record),
        SectionName::Qos => sections::validate_qos(record),
        SectionName::Acl => sections::validate_acl(record),
        SectionName::Span => sections::validate_span(record),
        SectionName::System => sections::validate_system(record),
        SectionName::Aaa => sections::validate_aaa(record),
    }
}

// =============================================================================
// Schema Defaults
// =============================================================================

/// The schema-defined boot configuration every store starts from
pub fn defaults() -> ConfigSnapshot {
    fn singleton(value: serde_json::Value) -> SectionData {
        match value {
            serde_json::Value::Object(map) => SectionData::Record(map),
            _ => SectionData::Record(Record::new()),
        }
    }

    let mut snapshot = ConfigSnapshot::new();
    for section in crate::types::section::ALL_SECTIONS {
        snapshot.insert(section, SectionData::empty(section.kind()));
    }

    snapshot.insert(
        SectionName::Stp,
        singleton(json!({"enabled": false, "mode": "rstp", "priority": 32768})),
    );
    snapshot.insert(SectionName::Lldp, singleton(json!({"enabled": false})));
    snapshot.insert(
        SectionName::IgmpSnooping,
        singleton(json!({"enabled": false})),
    );
    snapshot.insert(
        SectionName::Ospf,
        singleton(json!({"enabled": false, "areas": {}})),
    );
    snapshot.insert(
        SectionName::Bgp,
        singleton(json!({"enabled": false, "neighbors": {}})),
    );
    snapshot.insert(
        SectionName::System,
        singleton(json!({"hostname": "nateos-switch", "domain": "local"})),
    );
    snapshot.insert(
        SectionName::Aaa,
        singleton(json!({"auth_method": "local"})),
    );

    snapshot
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SectionKind;
    use serde_json::json;

    #[test]
    fn test_defaults_cover_every_section() {
        let defaults = defaults();
        assert_eq!(defaults.len(), 15);
        for section in crate::types::section::ALL_SECTIONS {
            let data = defaults.get(&section).unwrap();
            assert_eq!(data.kind(), section.kind(), "shape mismatch for {section}");
        }
    }

    #[test]
    fn test_defaults_match_boot_configuration() {
        let defaults = defaults();
        let stp = defaults[&SectionName::Stp].as_record().unwrap();
        assert_eq!(stp["mode"], json!("rstp"));
        assert_eq!(stp["priority"], json!(32768));

        let system = defaults[&SectionName::System].as_record().unwrap();
        assert_eq!(system["hostname"], json!("nateos-switch"));
        assert_eq!(system["domain"], json!("local"));
    }

    #[test]
    fn test_defaults_pass_their_own_schema() {
        let defaults = defaults();
        let refs = CrossRefs::from_snapshot(&defaults);
        for section in crate::types::section::ALL_SECTIONS {
            if section.kind() == SectionKind::Singleton {
                let record = defaults[&section].as_record().unwrap();
                validate(section, None, record, &refs)
                    .unwrap_or_else(|e| panic!("default for {section} invalid: {e}"));
            }
        }
    }

    #[test]
    fn test_cross_refs_from_snapshot() {
        let mut snapshot = defaults();
        let mut vlans = std::collections::BTreeMap::new();
        vlans.insert(
            "10".to_string(),
            json!({"vlan_id": 10}).as_object().cloned().unwrap(),
        );
        snapshot.insert(SectionName::Vlans, SectionData::Map(vlans));

        let refs = CrossRefs::from_snapshot(&snapshot);
        assert!(refs.vlan_ids.contains(&10));
        assert!(!refs.vlan_ids.contains(&20));
    }
}
