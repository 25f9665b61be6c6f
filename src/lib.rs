//! NateOS Management - Switch Configuration Core
//!
//! The configuration management core of a network switch operating system:
//! a concurrent in-memory configuration store, per-section schemas, and an
//! HTTP JSON API for reading and updating the running configuration.
//!
//! ## Core Features
//!
//! - **Sectioned Store**: 15 configuration sections (interfaces, VLANs, STP,
//!   routing, ACLs, ...) behind one reader-writer lock
//! - **Schema Validation**: every write is decoded, range-checked, and
//!   reference-checked before it becomes visible; invalid writes change nothing
//! - **Merge Semantics**: field-level merge for singletons and keyed members,
//!   ordered append/replace for rule lists
//! - **HTTP API**: generic `/api/config/{section}` access plus per-domain
//!   aliases under `/api/l2`, `/api/l3`, and `/api/mgmt`
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use nateos_mgmt::store::{ConfigStore, ReferencePolicy};
//!
//! let store = Arc::new(ConfigStore::new(ReferencePolicy::Deny));
//! let app = nateos_mgmt::api::router(store);
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`store`]: concurrent configuration store with atomic validated writes
//! - [`schema`]: per-section shapes, field rules, cross-section references
//! - [`api`]: axum router, handlers, wire envelopes
//! - [`settings`]: daemon settings (figment: defaults, file, env)
//! - [`cli`]: subcommands and the daemon HTTP client

pub mod api;
pub mod cli;
pub mod constants;
pub mod schema;
pub mod settings;
pub mod store;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Store
pub use store::{ConfigStore, ReferencePolicy};

// Schema
pub use schema::{CrossRefs, validate};

// Error Types
pub use types::error::{MgmtError, Result, ValidationError, ValidationKind};

// Sections
pub use types::section::{ConfigSnapshot, Record, SectionData, SectionKind, SectionName};

// Settings
pub use settings::{Settings, SettingsLoader};
