// Error responses for the HTTP boundary.
//
// Validation failures carry field-level detail. Bodies rejected before they
// could be read as JSON (too large, wrong content type) keep axum's status.
// Backend failures map to a distinct gateway status per failure kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::api_error;
use crate::backend::traits::BackendError;
use crate::filter::models::FieldError;

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Rejected {
        status: StatusCode,
        fields: Vec<FieldError>,
    },
    Backend(BackendError),
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": "Request validation failed",
                    "fields": fields,
                })),
            )
                .into_response(),
            ApiError::Rejected { status, fields } => (
                status,
                Json(serde_json::json!({
                    "error": "Request body rejected",
                    "fields": fields,
                })),
            )
                .into_response(),
            ApiError::Backend(err) => {
                let status = match &err {
                    BackendError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    BackendError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    BackendError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
                };
                api_error(status, &err.to_string())
            }
        }
    }
}
