//! HTTP mapping for [`SpeedrunError`].
//!
//! Invalid input becomes `400 {"error": "Invalid input", "details": ...}`;
//! anything else becomes `500 {"error": <message>}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use speedrun_shared::{SpeedrunError, ValidationErrors};

/// Handler error type.
#[derive(Debug)]
pub struct ApiError(pub SpeedrunError);

impl From<SpeedrunError> for ApiError {
    fn from(err: SpeedrunError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self(SpeedrunError::InvalidInput(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SpeedrunError::InvalidInput(details) => {
                tracing::debug!(%details, "rejected invalid input");
                let body = serde_json::json!({
                    "error": "Invalid input",
                    "details": details,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                let body = serde_json::json!({ "error": other.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
