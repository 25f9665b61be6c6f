//! Per-Section Record Schemas
//!
//! One typed record struct per section. Incoming payloads are decoded into
//! these types at the boundary (unknown fields and type mismatches are
//! rejected as `Malformed`), then range- and reference-checked, then
//! serialized back into the normalized wire record that the store commits.
//!
//! Every field is optional at the type level because keyed-map and singleton
//! writes are field-level merges; required fields are enforced here against
//! the fully merged candidate record.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CrossRefs;
use super::fields::{
    check_area_id, check_cidr, check_cidr_or_any, check_hostname, check_ip, check_ipv4,
    check_len, check_range,
};
use crate::constants;
use crate::types::{Record, ValidationError};

// =============================================================================
// Decode / Encode Helpers
// =============================================================================

fn decode<T: DeserializeOwned>(record: &Record) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|e| ValidationError::malformed(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<Record, ValidationError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ValidationError::malformed(
            "record did not serialize to a JSON object",
        )),
    }
}

// =============================================================================
// L2: Interfaces
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    Access,
    Trunk,
    Routed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortSpeed {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "10")]
    Mbps10,
    #[serde(rename = "100")]
    Mbps100,
    #[serde(rename = "1000")]
    Gbps1,
    #[serde(rename = "10000")]
    Gbps10,
    #[serde(rename = "25000")]
    Gbps25,
    #[serde(rename = "40000")]
    Gbps40,
    #[serde(rename = "100000")]
    Gbps100,
}

/// Physical or logical switch port configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterfaceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PortMode>,
    /// Access/native VLAN id; must reference an existing VLAN at commit time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<i64>,
    /// Trunk member VLANs; each must reference an existing VLAN at commit time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagged_vlans: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<PortSpeed>,
}

pub(super) fn validate_interface(
    record: &Record,
    refs: &CrossRefs,
) -> Result<Record, ValidationError> {
    let iface: InterfaceRecord = decode(record)?;

    if let Some(description) = &iface.description {
        check_len(
            "description",
            description,
            constants::interface::DESCRIPTION_MAX_LEN,
        )?;
    }
    if let Some(mtu) = iface.mtu {
        check_range(
            "mtu",
            mtu,
            constants::interface::MTU_MIN,
            constants::interface::MTU_MAX,
        )?;
    }
    if let Some(vlan) = iface.vlan {
        check_range("vlan", vlan, constants::vlan::ID_MIN, constants::vlan::ID_MAX)?;
        if !refs.vlan_ids.contains(&vlan) {
            return Err(ValidationError::dangling(format!(
                "references VLAN {} which does not exist",
                vlan
            ))
            .with_field("vlan"));
        }
    }
    if let Some(tagged) = &iface.tagged_vlans {
        for vlan in tagged {
            check_range(
                "tagged_vlans",
                *vlan,
                constants::vlan::ID_MIN,
                constants::vlan::ID_MAX,
            )?;
            if !refs.vlan_ids.contains(vlan) {
                return Err(ValidationError::dangling(format!(
                    "references VLAN {} which does not exist",
                    vlan
                ))
                .with_field("tagged_vlans"));
            }
        }
    }
    if let Some(ip) = &iface.ip_address {
        check_cidr("ip_address", ip)?;
    }

    encode(&iface)
}

// =============================================================================
// L2: VLANs
// =============================================================================

/// VLAN definition, keyed by `vlan_id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VlanRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub(super) fn validate_vlan(key: Option<&str>, record: &Record) -> Result<Record, ValidationError> {
    let mut vlan: VlanRecord = decode(record)?;

    // The map key and the vlan_id field must agree; either may supply the id.
    if let Some(key) = key {
        let key_id: i64 = key.parse().map_err(|_| {
            ValidationError::malformed(format!("VLAN key '{}' is not an integer", key))
                .with_field("vlan_id")
        })?;
        match vlan.vlan_id {
            None => vlan.vlan_id = Some(key_id),
            Some(id) if id != key_id => {
                return Err(ValidationError::malformed(format!(
                    "vlan_id {} does not match VLAN key '{}'",
                    id, key
                ))
                .with_field("vlan_id"));
            }
            Some(_) => {}
        }
    }

    let Some(vlan_id) = vlan.vlan_id else {
        return Err(ValidationError::missing_field("vlan_id"));
    };
    check_range(
        "vlan_id",
        vlan_id,
        constants::vlan::ID_MIN,
        constants::vlan::ID_MAX,
    )?;
    if let Some(name) = &vlan.name {
        check_len("name", name, constants::vlan::NAME_MAX_LEN)?;
    }

    encode(&vlan)
}

// =============================================================================
// L2: LACP
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LacpMode {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LacpRate {
    Slow,
    Fast,
}

/// Link aggregation group, keyed by LAG name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LacpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<LacpMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<LacpRate>,
}

pub(super) fn validate_lacp(record: &Record) -> Result<Record, ValidationError> {
    let lag: LacpRecord = decode(record)?;

    if let Some(members) = &lag.interfaces {
        for member in members {
            if member.is_empty() {
                return Err(ValidationError::malformed("member interface name is empty")
                    .with_field("interfaces"));
            }
        }
    }

    encode(&lag)
}

// =============================================================================
// L2: Spanning Tree
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StpMode {
    Stp,
    Rstp,
    Mstp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<StpMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hello_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
}

pub(super) fn validate_stp(record: &Record) -> Result<Record, ValidationError> {
    let stp: StpRecord = decode(record)?;

    if let Some(priority) = stp.priority {
        check_range(
            "priority",
            priority,
            constants::stp::PRIORITY_MIN,
            constants::stp::PRIORITY_MAX,
        )?;
    }
    if let Some(hello) = stp.hello_time {
        check_range(
            "hello_time",
            hello,
            constants::stp::HELLO_TIME_MIN,
            constants::stp::HELLO_TIME_MAX,
        )?;
    }
    if let Some(delay) = stp.forward_delay {
        check_range(
            "forward_delay",
            delay,
            constants::stp::FORWARD_DELAY_MIN,
            constants::stp::FORWARD_DELAY_MAX,
        )?;
    }
    if let Some(age) = stp.max_age {
        check_range(
            "max_age",
            age,
            constants::stp::MAX_AGE_MIN,
            constants::stp::MAX_AGE_MAX,
        )?;
    }

    encode(&stp)
}

// =============================================================================
// L2: LLDP
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LldpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_multiplier: Option<i64>,
}

pub(super) fn validate_lldp(record: &Record) -> Result<Record, ValidationError> {
    let lldp: LldpRecord = decode(record)?;

    if let Some(interval) = lldp.tx_interval {
        check_range(
            "tx_interval",
            interval,
            constants::lldp::TX_INTERVAL_MIN,
            constants::lldp::TX_INTERVAL_MAX,
        )?;
    }
    if let Some(hold) = lldp.hold_multiplier {
        check_range(
            "hold_multiplier",
            hold,
            constants::lldp::HOLD_MULTIPLIER_MIN,
            constants::lldp::HOLD_MULTIPLIER_MAX,
        )?;
    }

    encode(&lldp)
}

// =============================================================================
// L2: IGMP Snooping
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IgmpSnoopingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub querier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_interval: Option<i64>,
}

pub(super) fn validate_igmp_snooping(record: &Record) -> Result<Record, ValidationError> {
    let igmp: IgmpSnoopingRecord = decode(record)?;

    if let Some(interval) = igmp.query_interval {
        check_range("query_interval", interval, 1, 1800)?;
    }

    encode(&igmp)
}

// =============================================================================
// L3: Static Routes
// =============================================================================

/// Static route entry; list position encodes lookup priority
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRouteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub(super) fn validate_static_route(record: &Record) -> Result<Record, ValidationError> {
    let route: StaticRouteRecord = decode(record)?;

    let Some(destination) = &route.destination else {
        return Err(ValidationError::missing_field("destination"));
    };
    check_cidr("destination", destination)?;

    let Some(next_hop) = &route.next_hop else {
        return Err(ValidationError::missing_field("next_hop"));
    };
    check_ip("next_hop", next_hop)?;

    if let Some(distance) = route.distance {
        check_range(
            "distance",
            distance,
            constants::route::DISTANCE_MIN,
            constants::route::DISTANCE_MAX,
        )?;
    }

    encode(&route)
}

// =============================================================================
// L3: OSPF
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OspfAreaType {
    Normal,
    Stub,
    Nssa,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OspfAreaRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_type: Option<OspfAreaType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OspfRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    /// Areas keyed by area id (decimal or dotted quad)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<BTreeMap<String, OspfAreaRecord>>,
}

pub(super) fn validate_ospf(record: &Record) -> Result<Record, ValidationError> {
    let ospf: OspfRecord = decode(record)?;

    if let Some(router_id) = &ospf.router_id {
        check_ipv4("router_id", router_id)?;
    }
    if let Some(areas) = &ospf.areas {
        for (area_id, area) in areas {
            check_area_id("areas", area_id)?;
            if let Some(networks) = &area.networks {
                for network in networks {
                    check_cidr(&format!("areas.{}.networks", area_id), network)?;
                }
            }
        }
    }

    encode(&ospf)
}

// =============================================================================
// L3: BGP
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BgpNeighborRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_asn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BgpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    /// Neighbors keyed by peer address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbors: Option<BTreeMap<String, BgpNeighborRecord>>,
}

pub(super) fn validate_bgp(record: &Record) -> Result<Record, ValidationError> {
    let bgp: BgpRecord = decode(record)?;

    if let Some(asn) = bgp.asn {
        check_range("asn", asn, constants::bgp::ASN_MIN, constants::bgp::ASN_MAX)?;
    }
    if let Some(router_id) = &bgp.router_id {
        check_ipv4("router_id", router_id)?;
    }
    if let Some(neighbors) = &bgp.neighbors {
        for (peer, neighbor) in neighbors {
            check_ip("neighbors", peer)?;
            let field = format!("neighbors.{}.remote_asn", peer);
            let Some(remote_asn) = neighbor.remote_asn else {
                return Err(ValidationError::missing_field(field));
            };
            check_range(&field, remote_asn, constants::bgp::ASN_MIN, constants::bgp::ASN_MAX)?;
        }
    }

    encode(&bgp)
}

// =============================================================================
// L3: VRRP
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VrrpRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_router_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

pub(super) fn validate_vrrp(record: &Record) -> Result<Record, ValidationError> {
    let vrrp: VrrpRecord = decode(record)?;

    if let Some(vrid) = vrrp.virtual_router_id {
        check_range(
            "virtual_router_id",
            vrid,
            constants::vrrp::VRID_MIN,
            constants::vrrp::VRID_MAX,
        )?;
    }
    if let Some(priority) = vrrp.priority {
        check_range(
            "priority",
            priority,
            constants::vrrp::PRIORITY_MIN,
            constants::vrrp::PRIORITY_MAX,
        )?;
    }
    if let Some(ip) = &vrrp.virtual_ip {
        check_ip("virtual_ip", ip)?;
    }

    encode(&vrrp)
}

// =============================================================================
// Management: QoS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QosTrust {
    Cos,
    Dscp,
    Port,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QosRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<QosTrust>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_class: Option<i64>,
}

pub(super) fn validate_qos(record: &Record) -> Result<Record, ValidationError> {
    let qos: QosRecord = decode(record)?;

    if let Some(class) = qos.default_class {
        check_range("default_class", class, 0, 7)?;
    }

    encode(&qos)
}

// =============================================================================
// Management: ACL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    Permit,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclProtocol {
    Any,
    Tcp,
    Udp,
    Icmp,
}

/// ACL rule; rules evaluate first-match-wins in list order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AclRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AclAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<AclProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub(super) fn validate_acl(record: &Record) -> Result<Record, ValidationError> {
    let rule: AclRecord = decode(record)?;

    if rule.action.is_none() {
        return Err(ValidationError::missing_field("action"));
    }
    if let Some(source) = &rule.source {
        check_cidr_or_any("source", source)?;
    }
    if let Some(destination) = &rule.destination {
        check_cidr_or_any("destination", destination)?;
    }
    if let Some(port) = rule.src_port {
        check_range("src_port", port, constants::l4::PORT_MIN, constants::l4::PORT_MAX)?;
    }
    if let Some(port) = rule.dst_port {
        check_range("dst_port", port, constants::l4::PORT_MIN, constants::l4::PORT_MAX)?;
    }

    encode(&rule)
}

// =============================================================================
// Management: SPAN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanDirection {
    Rx,
    Tx,
    Both,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpanRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_interfaces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SpanDirection>,
}

pub(super) fn validate_span(record: &Record) -> Result<Record, ValidationError> {
    let span: SpanRecord = decode(record)?;

    if let Some(sources) = &span.source_interfaces {
        for source in sources {
            if source.is_empty() {
                return Err(ValidationError::malformed("source interface name is empty")
                    .with_field("source_interfaces"));
            }
        }
    }

    encode(&span)
}

// =============================================================================
// Management: System Identity
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub(super) fn validate_system(record: &Record) -> Result<Record, ValidationError> {
    let system: SystemRecord = decode(record)?;

    if let Some(hostname) = &system.hostname {
        check_hostname("hostname", hostname, constants::system::HOSTNAME_MAX_LEN)?;
    }
    if let Some(domain) = &system.domain {
        check_len("domain", domain, 253)?;
    }

    encode(&system)
}

// =============================================================================
// Management: AAA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Local,
    Radius,
    Tacacs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AaaRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<AuthMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting: Option<bool>,
}

pub(super) fn validate_aaa(record: &Record) -> Result<Record, ValidationError> {
    let aaa: AaaRecord = decode(record)?;

    if let Some(server) = &aaa.radius_server {
        check_ip("radius_server", server)?;
    }

    encode(&aaa)
}

// =============================================================================
// Tests
// =============================================================================
