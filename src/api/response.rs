//! Response Envelopes and Error Mapping
//!
//! Uniform wire shapes for the management API: success envelopes carry
//! `{"status": ..., <section>: <data>}`, failures carry `{"error": <message>}`
//! with the HTTP status chosen by error kind (NotFound→404, validation and
//! payload errors→400).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::types::MgmtError;

/// Handler result carrying a store error mapped to a wire failure
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Transport wrapper for [`MgmtError`]
pub struct ApiError(pub MgmtError);

impl From<MgmtError> for ApiError {
    fn from(err: MgmtError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MgmtError::SectionNotFound(_) | MgmtError::RecordNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            MgmtError::Validation(_) | MgmtError::BadRequest(_) | MgmtError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

/// Build a `{"status": <status>, <label>: <value>}` success envelope
pub fn envelope(status: &str, label: &str, value: Value) -> Json<Value> {
    Json(json!({"status": status, label: value}))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn test_envelope_shape() {
        let Json(body) = envelope("updated", "stp", json!({"enabled": true}));
        assert_eq!(body["status"], json!("updated"));
        assert_eq!(body["stp"]["enabled"], json!(true));
    }

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError(MgmtError::SectionNotFound("bogus".into())).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let validation =
            ApiError(MgmtError::from(ValidationError::malformed("bad"))).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let bad_request = ApiError(MgmtError::BadRequest("nope".into())).into_response();
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);
    }
}
