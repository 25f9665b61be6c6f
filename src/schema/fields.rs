//! Semantic Field Checks
//!
//! Pure validation helpers for the semantic field types used across section
//! schemas: integer ranges, CIDR prefixes, IP addresses, hostnames. Each
//! helper returns a `ValidationError` naming the offending field and reason.

use std::net::{IpAddr, Ipv4Addr};

use crate::types::ValidationError;

/// Check that an integer field is within its declared inclusive range.
///
/// Integer fields are carried as `i64` through decoding so that negative
/// inputs surface as `OutOfRange` rather than a type error.
pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(format!(
            "must be between {} and {}, got {}",
            min, max, value
        ))
        .with_field(field));
    }
    Ok(())
}

/// Check that a string field parses as an IPv4 or IPv6 address
pub fn check_ip(field: &str, value: &str) -> Result<(), ValidationError> {
    value.parse::<IpAddr>().map_err(|_| {
        ValidationError::malformed(format!("'{}' is not a valid IP address", value))
            .with_field(field)
    })?;
    Ok(())
}

/// Check that a string field parses as an IPv4 address (router ids)
pub fn check_ipv4(field: &str, value: &str) -> Result<(), ValidationError> {
    value.parse::<Ipv4Addr>().map_err(|_| {
        ValidationError::malformed(format!("'{}' is not a valid IPv4 address", value))
            .with_field(field)
    })?;
    Ok(())
}

/// Check that a string field parses as CIDR notation (`address/prefix-length`)
pub fn check_cidr(field: &str, value: &str) -> Result<(), ValidationError> {
    let malformed = || {
        ValidationError::malformed(format!("'{}' is not a valid CIDR prefix", value))
            .with_field(field)
    };

    let (addr, prefix) = value.split_once('/').ok_or_else(malformed)?;
    let addr: IpAddr = addr.parse().map_err(|_| malformed())?;
    let prefix: u8 = prefix.parse().map_err(|_| malformed())?;

    let max_prefix = match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    if prefix > max_prefix {
        return Err(ValidationError::out_of_range(format!(
            "prefix length must be at most {}, got {}",
            max_prefix, prefix
        ))
        .with_field(field));
    }
    Ok(())
}

/// Check a match field that is either the literal `any` or a CIDR prefix
pub fn check_cidr_or_any(field: &str, value: &str) -> Result<(), ValidationError> {
    if value == "any" {
        return Ok(());
    }
    check_cidr(field, value)
}

/// Check an OSPF area id: decimal `u32` or dotted-quad notation
pub fn check_area_id(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.parse::<u32>().is_ok() || value.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }
    Err(
        ValidationError::malformed(format!("'{}' is not a valid OSPF area id", value))
            .with_field(field),
    )
}

/// Check a hostname: non-empty, bounded length, RFC 1035 label characters
pub fn check_hostname(field: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::malformed("hostname must not be empty").with_field(field));
    }
    if value.len() > max_len {
        return Err(ValidationError::out_of_range(format!(
            "hostname must be at most {} characters, got {}",
            max_len,
            value.len()
        ))
        .with_field(field));
    }
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_chars || value.starts_with('-') || value.ends_with('-') {
        return Err(ValidationError::malformed(format!(
            "'{}' is not a valid hostname label",
            value
        ))
        .with_field(field));
    }
    Ok(())
}

/// Check that a string field does not exceed a maximum length
pub fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.len() > max_len {
        return Err(ValidationError::out_of_range(format!(
            "must be at most {} characters, got {}",
            max_len,
            value.len()
        ))
        .with_field(field));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
