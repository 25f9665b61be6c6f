//! Configuration Store
//!
//! The single process-wide authoritative holder of all configuration
//! sections. Owns validation and atomic section mutation.
//!
//! ## Concurrency Discipline
//!
//! All state lives behind a single `RwLock`. Every mutating operation takes
//! the write lock for the duration of validation plus mutation, and builds
//! its cross-reference snapshot inside that critical section, so there is no
//! time-of-check/time-of-use gap between validating a reference and
//! committing the record that depends on it. Reads take the read lock and
//! copy out a consistent snapshot; no reader can observe a section mid-merge.
//!
//! A rejected operation leaves the store exactly as it was: candidate data is
//! fully validated before anything is inserted.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::schema::{self, CrossRefs};
use crate::types::{
    ConfigSnapshot, MgmtError, Record, Result, SectionData, SectionKind, SectionName,
    ValidationError, merge_records,
};

// =============================================================================
// Reference Policy
// =============================================================================

/// What to do when deleting a VLAN that an interface still references.
///
/// The write-time dangling check does not re-validate on later deletes, so
/// this is surfaced as an explicit policy rather than silently picking one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Refuse to delete a VLAN with live interface references
    #[default]
    Deny,
    /// Allow the delete and leave the stale reference in place
    Allow,
}

// =============================================================================
// Config Store
// =============================================================================

/// Authoritative in-memory configuration store
pub struct ConfigStore {
    policy: ReferencePolicy,
    inner: RwLock<ConfigSnapshot>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ReferencePolicy::default())
    }
}

impl ConfigStore {
    /// Create a store seeded with the schema-defined defaults
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            policy,
            inner: RwLock::new(schema::defaults()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ConfigSnapshot> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConfigSnapshot> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Deep copy of the full configuration at one logical instant
    pub fn get_all(&self) -> ConfigSnapshot {
        self.read().clone()
    }

    /// Snapshot of a single section
    pub fn get_section(&self, section: SectionName) -> SectionData {
        // Every section is seeded at construction; the fallback is unreachable
        // in practice but keeps the accessor panic-free.
        self.read()
            .get(&section)
            .cloned()
            .unwrap_or_else(|| SectionData::empty(section.kind()))
    }

    /// Record at `key` in a keyed-map section
    pub fn get_record(&self, section: SectionName, key: &str) -> Result<Record> {
        require_kind(section, SectionKind::KeyedMap)?;
        let guard = self.read();
        match guard.get(&section) {
            Some(SectionData::Map(map)) => map
                .get(key)
                .cloned()
                .ok_or_else(|| MgmtError::record_not_found(section.as_str(), key)),
            _ => Err(MgmtError::record_not_found(section.as_str(), key)),
        }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Section-level write.
    ///
    /// Singleton sections take a field-level merge; keyed-map sections take a
    /// key-level merge (each provided key's record is replaced wholesale);
    /// ordered-list sections are replaced in full. All candidate records are
    /// validated before anything is committed.
    pub fn put_section(&self, section: SectionName, payload: Value) -> Result<SectionData> {
        let mut guard = self.write();
        let refs = CrossRefs::from_snapshot(&guard);

        let updated = match section.kind() {
            SectionKind::Singleton => {
                let patch = as_object(&payload)?;
                let current = singleton_of(&guard, section);
                let merged = merge_records(&current, patch);
                let normalized = schema::validate(section, None, &merged, &refs)?;
                SectionData::Record(normalized)
            }
            SectionKind::KeyedMap => {
                let patch = as_object(&payload)?;
                let mut staged = Vec::with_capacity(patch.len());
                for (key, value) in patch {
                    let record = value.as_object().ok_or_else(|| {
                        ValidationError::malformed(format!(
                            "entry '{}' must be a JSON object",
                            key
                        ))
                    })?;
                    staged.push((
                        key.clone(),
                        schema::validate(section, Some(key.as_str()), record, &refs)?,
                    ));
                }
                let mut updated = map_of(&guard, section);
                updated.extend(staged);
                SectionData::Map(updated)
            }
            SectionKind::OrderedList => {
                let items = payload.as_array().ok_or_else(|| {
                    ValidationError::malformed("expected a JSON array for a list section")
                })?;
                let mut staged = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let record = item.as_object().ok_or_else(|| {
                        ValidationError::malformed(format!(
                            "entry {} must be a JSON object",
                            index
                        ))
                    })?;
                    staged.push(schema::validate(section, None, record, &refs)?);
                }
                SectionData::List(staged)
            }
        };

        guard.insert(section, updated.clone());
        debug!(section = %section, "section updated");
        Ok(updated)
    }

    /// Create-or-merge the record at `key` in a keyed-map section.
    ///
    /// Fields present in the payload replace the prior values; unspecified
    /// fields are retained. The merged record is validated as a whole.
    pub fn put_record(&self, section: SectionName, key: &str, payload: Value) -> Result<Record> {
        require_kind(section, SectionKind::KeyedMap)?;
        let mut guard = self.write();
        let refs = CrossRefs::from_snapshot(&guard);

        let mut map = map_of(&guard, section);
        let base = map.get(key).cloned().unwrap_or_default();
        let merged = merge_records(&base, as_object(&payload)?);
        let normalized = schema::validate(section, Some(key), &merged, &refs)?;

        map.insert(key.to_string(), normalized.clone());
        guard.insert(section, SectionData::Map(map));
        debug!(section = %section, key, "record updated");
        Ok(normalized)
    }

    /// Collection-level create for keyed-map sections whose schema names a key
    /// field (VLANs, keyed by `vlan_id`). The record at the derived key is
    /// replaced wholesale.
    pub fn create_record(&self, section: SectionName, payload: Value) -> Result<(String, Record)> {
        require_kind(section, SectionKind::KeyedMap)?;
        let Some(key_field) = section.key_field() else {
            return Err(MgmtError::BadRequest(format!(
                "section '{}' does not support collection create",
                section
            )));
        };

        let patch = as_object(&payload)?;
        let key = match patch.get(key_field) {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => return Err(MgmtError::BadRequest(format!("{} required", key_field))),
        };

        let mut guard = self.write();
        let refs = CrossRefs::from_snapshot(&guard);
        let normalized = schema::validate(section, Some(key.as_str()), patch, &refs)?;

        let mut map = map_of(&guard, section);
        map.insert(key.clone(), normalized.clone());
        guard.insert(section, SectionData::Map(map));
        debug!(section = %section, key, "record created");
        Ok((key, normalized))
    }

    /// Validate and append a record to an ordered-list section; returns the
    /// appended record with its assigned index.
    pub fn append_record(&self, section: SectionName, payload: Value) -> Result<(usize, Record)> {
        require_kind(section, SectionKind::OrderedList)?;
        let mut guard = self.write();
        let refs = CrossRefs::from_snapshot(&guard);

        let normalized = schema::validate(section, None, as_object(&payload)?, &refs)?;

        let mut list = list_of(&guard, section);
        list.push(normalized.clone());
        let index = list.len() - 1;
        guard.insert(section, SectionData::List(list));
        debug!(section = %section, index, "record appended");
        Ok((index, normalized))
    }

    /// Remove a record by map key or list index; returns the removed record.
    ///
    /// List deletion is positional: subsequent indices shift down, and callers
    /// must use post-delete indices for further deletes.
    pub fn delete_record(&self, section: SectionName, selector: &str) -> Result<Record> {
        let mut guard = self.write();

        match section.kind() {
            SectionKind::KeyedMap => {
                if section == SectionName::Vlans
                    && self.policy == ReferencePolicy::Deny
                    && let Ok(vlan_id) = selector.parse::<i64>()
                    && let Some(interface) = vlan_in_use(&guard, vlan_id)
                {
                    return Err(ValidationError::dangling(format!(
                        "VLAN {} is still referenced by interface '{}'",
                        vlan_id, interface
                    ))
                    .with_field("vlan_id")
                    .into());
                }

                let mut map = map_of(&guard, section);
                let removed = map
                    .remove(selector)
                    .ok_or_else(|| MgmtError::record_not_found(section.as_str(), selector))?;
                guard.insert(section, SectionData::Map(map));
                debug!(section = %section, key = selector, "record deleted");
                Ok(removed)
            }
            SectionKind::OrderedList => {
                let index: usize = selector
                    .parse()
                    .map_err(|_| MgmtError::record_not_found(section.as_str(), selector))?;
                let mut list = list_of(&guard, section);
                if index >= list.len() {
                    return Err(MgmtError::record_not_found(section.as_str(), selector));
                }
                let removed = list.remove(index);
                guard.insert(section, SectionData::List(list));
                debug!(section = %section, index, "record deleted");
                Ok(removed)
            }
            SectionKind::Singleton => Err(MgmtError::BadRequest(format!(
                "cannot delete from singleton section '{}'",
                section
            ))),
        }
    }
}

// =============================================================================
// Shape Helpers
// =============================================================================

fn require_kind(section: SectionName, expected: SectionKind) -> Result<()> {
    if section.kind() != expected {
        return Err(MgmtError::BadRequest(format!(
            "section '{}' is {}, not {}",
            section,
            section.kind(),
            expected
        )));
    }
    Ok(())
}

fn as_object(payload: &Value) -> std::result::Result<&Record, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::malformed("expected a JSON object"))
}

fn singleton_of(snapshot: &ConfigSnapshot, section: SectionName) -> Record {
    match snapshot.get(&section) {
        Some(SectionData::Record(record)) => record.clone(),
        _ => Record::new(),
    }
}

fn map_of(snapshot: &ConfigSnapshot, section: SectionName) -> BTreeMap<String, Record> {
    match snapshot.get(&section) {
        Some(SectionData::Map(map)) => map.clone(),
        _ => BTreeMap::new(),
    }
}

fn list_of(snapshot: &ConfigSnapshot, section: SectionName) -> Vec<Record> {
    match snapshot.get(&section) {
        Some(SectionData::List(list)) => list.clone(),
        _ => Vec::new(),
    }
}

/// First interface whose `vlan` or `tagged_vlans` references the given VLAN id
fn vlan_in_use(snapshot: &ConfigSnapshot, vlan_id: i64) -> Option<String> {
    let SectionData::Map(interfaces) = snapshot.get(&SectionName::Interfaces)? else {
        return None;
    };
    for (name, record) in interfaces {
        if record.get("vlan").and_then(Value::as_i64) == Some(vlan_id) {
            return Some(name.clone());
        }
        if let Some(tagged) = record.get("tagged_vlans").and_then(Value::as_array)
            && tagged.iter().any(|v| v.as_i64() == Some(vlan_id))
        {
            return Some(name.clone());
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn store() -> ConfigStore {
        ConfigStore::default()
    }

    fn add_vlan(store: &ConfigStore, id: i64) {
        store
            .create_record(SectionName::Vlans, json!({"vlan_id": id}))
            .unwrap();
    }

    #[test]
    fn test_seeded_defaults() {
        let store = store();
        let system = store.get_section(SectionName::System);
        assert_eq!(
            system.as_record().unwrap()["hostname"],
            json!("nateos-switch")
        );
        assert!(store
            .get_section(SectionName::Interfaces)
            .as_map()
            .unwrap()
            .is_empty());
        assert!(store
            .get_section(SectionName::StaticRoutes)
            .as_list()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let store = store();
        let mut snapshot = store.get_all();
        snapshot.insert(SectionName::System, SectionData::Record(Record::new()));
        // Mutating the returned snapshot never affects the store
        assert_eq!(
            store.get_section(SectionName::System).as_record().unwrap()["hostname"],
            json!("nateos-switch")
        );
    }

    #[test]
    fn test_singleton_merge_retains_unspecified_fields() {
        let store = store();
        store
            .put_section(SectionName::Stp, json!({"enabled": true}))
            .unwrap();

        let stp = store.get_section(SectionName::Stp);
        let stp = stp.as_record().unwrap();
        assert_eq!(stp["enabled"], json!(true));
        assert_eq!(stp["mode"], json!("rstp"));
        assert_eq!(stp["priority"], json!(32768));
    }

    #[test]
    fn test_singleton_merge_idempotent() {
        let store = store();
        let payload = json!({"enabled": true, "priority": 8192});
        let once = store.put_section(SectionName::Stp, payload.clone()).unwrap();
        let twice = store.put_section(SectionName::Stp, payload).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_atomic_rejection_of_partial_merge() {
        let store = store();
        let before = store.get_section(SectionName::Stp);

        let err = store
            .put_section(SectionName::Stp, json!({"enabled": true, "priority": 99999}))
            .unwrap_err();
        assert!(matches!(err, MgmtError::Validation(_)));

        // No partial application: enabled stayed false
        assert_eq!(store.get_section(SectionName::Stp), before);
    }

    #[test]
    fn test_keyed_put_section_is_atomic() {
        let store = store();
        let err = store
            .put_section(
                SectionName::Vlans,
                json!({
                    "10": {"vlan_id": 10, "name": "eng"},
                    "9999": {"vlan_id": 9999}
                }),
            )
            .unwrap_err();
        assert!(matches!(err, MgmtError::Validation(_)));
        assert!(store
            .get_section(SectionName::Vlans)
            .as_map()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_record_merge_combines_disjoint_fields() {
        let store = store();
        add_vlan(&store, 10);
        store
            .put_record(SectionName::Interfaces, "eth0", json!({"mode": "access"}))
            .unwrap();
        store
            .put_record(SectionName::Interfaces, "eth0", json!({"vlan": 10}))
            .unwrap();

        let eth0 = store.get_record(SectionName::Interfaces, "eth0").unwrap();
        assert_eq!(eth0["mode"], json!("access"));
        assert_eq!(eth0["vlan"], json!(10));
    }

    #[test]
    fn test_dangling_reference_rejected_until_vlan_exists() {
        let store = store();

        let err = store
            .put_record(
                SectionName::Interfaces,
                "eth0",
                json!({"mode": "trunk", "vlan": 10}),
            )
            .unwrap_err();
        let MgmtError::Validation(validation) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(
            validation.kind,
            crate::types::ValidationKind::DanglingReference
        );
        // Rejected write left no trace
        assert!(store.get_record(SectionName::Interfaces, "eth0").is_err());

        add_vlan(&store, 10);
        store
            .put_record(
                SectionName::Interfaces,
                "eth0",
                json!({"mode": "trunk", "vlan": 10}),
            )
            .unwrap();
    }

    #[test]
    fn test_list_ordering_and_positional_delete() {
        let store = store();
        let routes = [
            json!({"destination": "10.0.1.0/24", "next_hop": "192.168.1.1"}),
            json!({"destination": "10.0.2.0/24", "next_hop": "192.168.1.2"}),
            json!({"destination": "10.0.3.0/24", "next_hop": "192.168.1.3"}),
        ];
        for (i, route) in routes.iter().enumerate() {
            let (index, _) = store
                .append_record(SectionName::StaticRoutes, route.clone())
                .unwrap();
            assert_eq!(index, i);
        }

        let removed = store.delete_record(SectionName::StaticRoutes, "1").unwrap();
        assert_eq!(removed["destination"], json!("10.0.2.0/24"));

        let list = store.get_section(SectionName::StaticRoutes);
        let list = list.as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["destination"], json!("10.0.1.0/24"));
        assert_eq!(list[1]["destination"], json!("10.0.3.0/24"));

        // Post-delete indices: index 1 is now the former third route
        let removed = store.delete_record(SectionName::StaticRoutes, "1").unwrap();
        assert_eq!(removed["destination"], json!("10.0.3.0/24"));

        let err = store
            .delete_record(SectionName::StaticRoutes, "5")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_put_section_replaces() {
        let store = store();
        store
            .append_record(
                SectionName::Acl,
                json!({"action": "deny", "source": "any"}),
            )
            .unwrap();
        store
            .put_section(
                SectionName::Acl,
                json!([{"action": "permit", "protocol": "tcp"}]),
            )
            .unwrap();

        let acl = store.get_section(SectionName::Acl);
        let acl = acl.as_list().unwrap();
        assert_eq!(acl.len(), 1);
        assert_eq!(acl[0]["action"], json!("permit"));
    }

    #[test]
    fn test_vlan_delete_denied_while_referenced() {
        let store = store();
        add_vlan(&store, 10);
        store
            .put_record(SectionName::Interfaces, "eth0", json!({"vlan": 10}))
            .unwrap();

        let err = store.delete_record(SectionName::Vlans, "10").unwrap_err();
        let MgmtError::Validation(validation) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(
            validation.kind,
            crate::types::ValidationKind::DanglingReference
        );
        assert!(store.get_record(SectionName::Vlans, "10").is_ok());
    }

    #[test]
    fn test_vlan_delete_allowed_under_allow_policy() {
        let store = ConfigStore::new(ReferencePolicy::Allow);
        add_vlan(&store, 10);
        store
            .put_record(SectionName::Interfaces, "eth0", json!({"vlan": 10}))
            .unwrap();

        store.delete_record(SectionName::Vlans, "10").unwrap();
        // Stale reference is left in place by policy
        let eth0 = store.get_record(SectionName::Interfaces, "eth0").unwrap();
        assert_eq!(eth0["vlan"], json!(10));
    }

    #[test]
    fn test_singleton_delete_rejected() {
        let store = store();
        let err = store.delete_record(SectionName::Stp, "priority").unwrap_err();
        assert!(matches!(err, MgmtError::BadRequest(_)));
    }

    #[test]
    fn test_get_record_not_found() {
        let store = store();
        let err = store
            .get_record(SectionName::Interfaces, "eth99")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_record_requires_key_field() {
        let store = store();
        let err = store
            .create_record(SectionName::Vlans, json!({"name": "eng"}))
            .unwrap_err();
        assert!(matches!(err, MgmtError::BadRequest(msg) if msg.contains("vlan_id required")));

        let err = store
            .create_record(SectionName::Interfaces, json!({"mode": "access"}))
            .unwrap_err();
        assert!(matches!(err, MgmtError::BadRequest(_)));
    }

    #[test]
    fn test_concurrent_writes_to_different_keys() {
        use std::sync::Arc;

        let store = Arc::new(ConfigStore::default());
        let mut handles = Vec::new();
        for id in 1..=8i64 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store
                    .create_record(
                        SectionName::Vlans,
                        json!({"vlan_id": id, "name": format!("vlan-{id}")}),
                    )
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let vlans = store.get_section(SectionName::Vlans);
        assert_eq!(vlans.as_map().unwrap().len(), 8);
    }

    #[test]
    fn test_concurrent_disjoint_field_merges_to_same_key() {
        use std::sync::Arc;

        let store = Arc::new(ConfigStore::default());
        let first = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .put_record(
                        SectionName::Interfaces,
                        "eth0",
                        json!({"enabled": true}),
                    )
                    .unwrap();
            })
        };
        let second = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .put_record(
                        SectionName::Interfaces,
                        "eth0",
                        json!({"mtu": 9000}),
                    )
                    .unwrap();
            })
        };
        first.join().unwrap();
        second.join().unwrap();

        // Disjoint fields from both writers are present regardless of order
        let eth0 = store.get_record(SectionName::Interfaces, "eth0").unwrap();
        assert_eq!(eth0["enabled"], json!(true));
        assert_eq!(eth0["mtu"], json!(9000));
    }

    proptest! {
        #[test]
        fn prop_vlan_put_is_idempotent(id in 1i64..=4094, name in "[a-z]{1,16}") {
            let store = ConfigStore::default();
            let payload = json!({"vlan_id": id, "name": name});
            store.create_record(SectionName::Vlans, payload.clone()).unwrap();
            let after_once = store.get_section(SectionName::Vlans);
            store.create_record(SectionName::Vlans, payload).unwrap();
            prop_assert_eq!(after_once, store.get_section(SectionName::Vlans));
        }

        #[test]
        fn prop_stp_priority_range_enforced(priority in proptest::num::i64::ANY) {
            let store = ConfigStore::default();
            let result = store.put_section(SectionName::Stp, json!({"priority": priority}));
            let in_range = (0..=61440).contains(&priority);
            prop_assert_eq!(result.is_ok(), in_range);
        }
    }
}
