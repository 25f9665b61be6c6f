//! Core Types
//!
//! Section identifiers, section data shapes, and the unified error type.

pub mod error;
pub mod section;

pub use error::{MgmtError, Result, ValidationError, ValidationKind};
pub use section::{ConfigSnapshot, Record, SectionData, SectionKind, SectionName, merge_records};
