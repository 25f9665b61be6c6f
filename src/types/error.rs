//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Taxonomy
//!
//! - **Not found**: unknown section, or absent record key/index
//! - **Validation**: malformed, out-of-range, missing, or dangling-reference field
//! - **Bad request**: unparseable or structurally wrong payload
//!
//! ## Design Principles
//!
//! - Single unified error type (MgmtError) for the entire application
//! - Structured validation errors naming the offending field and reason
//! - No error is fatal to the process: every failure is scoped to one request
//!   and the store remains valid after any rejected operation

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Value fails to parse or has the wrong type
    Malformed,
    /// Integer value outside its declared range
    OutOfRange,
    /// Required field absent
    MissingField,
    /// Cross-section reference names a record that does not exist
    DanglingReference,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "MALFORMED"),
            Self::OutOfRange => write!(f, "OUT_OF_RANGE"),
            Self::MissingField => write!(f, "MISSING_FIELD"),
            Self::DanglingReference => write!(f, "DANGLING_REFERENCE"),
        }
    }
}

/// Structured validation error naming the offending field and reason
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What kind of validation failed
    pub kind: ValidationKind,
    /// Field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] '{}': {}", self.kind, field, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// A value that fails to parse or has the wrong type
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::Malformed, message)
    }

    /// An integer outside its declared range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::OutOfRange, message)
    }

    /// A required field that is absent
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(ValidationKind::MissingField, "required field is missing").with_field(field)
    }

    /// A cross-section reference to a record that does not exist
    pub fn dangling(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::DanglingReference, message)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum MgmtError {
    // -------------------------------------------------------------------------
    // Not-found Errors
    // -------------------------------------------------------------------------
    #[error("section '{0}' not found")]
    SectionNotFound(String),

    #[error("'{key}' not found in section '{section}'")]
    RecordNotFound { section: String, key: String },

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("bad request: {0}")]
    BadRequest(String),

    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl MgmtError {
    /// Create a record-not-found error
    pub fn record_not_found(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::RecordNotFound {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Check whether this error maps to a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SectionNotFound(_) | Self::RecordNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MgmtError>;

// =============================================================================
// Tests
// =============================================================================
