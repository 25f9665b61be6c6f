//! HTTP Handlers
//!
//! Handler functions for every management API endpoint. This layer is a pure
//! transport adapter: it parses paths and bodies, delegates to the store, and
//! shapes responses. All business validation happens in the store and schema.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use super::response::{ApiError, ApiResult, envelope};
use crate::constants::SERVICE_NAME;
use crate::store::ConfigStore;
use crate::types::{ConfigSnapshot, MgmtError, SectionData, SectionName};

/// Shared handle to the process-wide store
pub type SharedStore = Arc<ConfigStore>;

/// Request body, or a 400 `{error}` response for malformed JSON
pub type Body = Result<Json<Value>, JsonRejection>;

fn body_value(body: Body) -> ApiResult<Value> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError(MgmtError::BadRequest(format!(
            "invalid JSON payload: {}",
            rejection.body_text()
        )))),
    }
}

fn to_value(data: SectionData) -> ApiResult<Value> {
    serde_json::to_value(data).map_err(|e| ApiError(e.into()))
}

// =============================================================================
// Health and Generic Section Endpoints
// =============================================================================

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": SERVICE_NAME}))
}

/// `GET /api/config`
pub async fn get_config(State(store): State<SharedStore>) -> Json<ConfigSnapshot> {
    Json(store.get_all())
}

/// `GET /api/config/{section}`
pub async fn get_config_section(
    State(store): State<SharedStore>,
    Path(section): Path<String>,
) -> ApiResult<Json<SectionData>> {
    let section: SectionName = section.parse().map_err(ApiError)?;
    Ok(Json(store.get_section(section)))
}

/// `PUT|POST /api/config/{section}`
pub async fn put_config_section(
    State(store): State<SharedStore>,
    Path(section): Path<String>,
    body: Body,
) -> ApiResult<Json<Value>> {
    let section: SectionName = section.parse().map_err(ApiError)?;
    let updated = store.put_section(section, body_value(body)?)?;
    Ok(envelope("updated", section.as_str(), to_value(updated)?))
}

// =============================================================================
// Singleton Aliases
// =============================================================================

/// `GET` on a singleton alias (`/api/l2/stp`, `/api/mgmt/system`, ...)
pub async fn get_singleton(
    State(store): State<SharedStore>,
    section: SectionName,
) -> Json<SectionData> {
    Json(store.get_section(section))
}

/// `PUT` on a singleton alias: field-level merge
pub async fn put_singleton(
    State(store): State<SharedStore>,
    section: SectionName,
    body: Body,
) -> ApiResult<Json<Value>> {
    let updated = store.put_section(section, body_value(body)?)?;
    Ok(envelope("updated", section.as_str(), to_value(updated)?))
}

// =============================================================================
// Keyed-Map Aliases
// =============================================================================

/// `GET` on a keyed or list collection: raw section snapshot
pub async fn get_collection(
    State(store): State<SharedStore>,
    section: SectionName,
) -> Json<SectionData> {
    Json(store.get_section(section))
}

/// `PUT` on a keyed collection: key-level merge of the provided entries
pub async fn put_keyed_collection(
    State(store): State<SharedStore>,
    section: SectionName,
    body: Body,
) -> ApiResult<Json<Value>> {
    let updated = store.put_section(section, body_value(body)?)?;
    Ok(envelope("updated", section.as_str(), to_value(updated)?))
}

/// `GET` on a keyed member
pub async fn get_keyed_member(
    State(store): State<SharedStore>,
    section: SectionName,
    Path(key): Path<String>,
) -> ApiResult<Json<Value>> {
    let record = store.get_record(section, &key)?;
    Ok(Json(Value::Object(record)))
}

/// `PUT|POST` on a keyed member: create-or-merge with `{status, <label>: record}`
pub async fn put_keyed_member(
    State(store): State<SharedStore>,
    section: SectionName,
    label: &'static str,
    Path(key): Path<String>,
    body: Body,
) -> ApiResult<Json<Value>> {
    let record = store.put_record(section, &key, body_value(body)?)?;
    Ok(envelope("updated", label, Value::Object(record)))
}

/// `PUT|POST /api/l2/interfaces/{interface}` keeps its historical envelope
/// carrying both the interface name and the merged config.
pub async fn put_interface(
    State(store): State<SharedStore>,
    Path(interface): Path<String>,
    body: Body,
) -> ApiResult<Json<Value>> {
    let record = store.put_record(SectionName::Interfaces, &interface, body_value(body)?)?;
    Ok(Json(json!({
        "status": "updated",
        "interface": interface,
        "config": Value::Object(record),
    })))
}

/// `DELETE` on a keyed member: `{"status":"deleted", <label>: key}`
pub async fn delete_keyed_member(
    State(store): State<SharedStore>,
    section: SectionName,
    label: &'static str,
    Path(key): Path<String>,
) -> ApiResult<Json<Value>> {
    store.delete_record(section, &key)?;
    Ok(envelope("deleted", label, Value::String(key)))
}

/// `POST /api/l2/vlans`: collection create keyed by the payload's `vlan_id`
pub async fn create_vlan(State(store): State<SharedStore>, body: Body) -> ApiResult<Json<Value>> {
    let (_, record) = store.create_record(SectionName::Vlans, body_value(body)?)?;
    Ok(envelope("created", "vlan", Value::Object(record)))
}

// =============================================================================
// Ordered-List Aliases
// =============================================================================

/// `POST` on a list collection: validate and append
pub async fn append_list(
    State(store): State<SharedStore>,
    section: SectionName,
    label: &'static str,
    body: Body,
) -> ApiResult<Json<Value>> {
    let (_, record) = store.append_record(section, body_value(body)?)?;
    Ok(envelope("added", label, Value::Object(record)))
}

/// `PUT` on a list collection: full replace
pub async fn put_list(
    State(store): State<SharedStore>,
    section: SectionName,
    body: Body,
) -> ApiResult<Json<Value>> {
    let updated = store.put_section(section, body_value(body)?)?;
    Ok(envelope("updated", section.as_str(), to_value(updated)?))
}

/// `DELETE` on a list index: positional removal, later indices shift down
pub async fn delete_list_index(
    State(store): State<SharedStore>,
    section: SectionName,
    label: &'static str,
    Path(index): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = store.delete_record(section, &index)?;
    Ok(envelope("deleted", label, Value::Object(removed)))
}
