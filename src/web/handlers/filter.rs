// POST /filter: classify a piece of text.
//
// Returns 200 with a FilterResponse on success.
// Returns 422 with field-level detail if the body fails validation; the
// backend is never called in that case.
// Returns 413/415 if the body is too large or not sent as JSON.
// Returns 503/504/502 if the model backend is down, slow, or incoherent.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::filter::models::{FieldError, FilterRequest, FilterResponse};
use crate::web::error::ApiError;
use crate::web::AppState;

pub async fn filter_content(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FilterResponse>, ApiError> {
    let Json(body) = body.map_err(body_rejection)?;

    let request = FilterRequest::from_json(&body).map_err(ApiError::Validation)?;

    match state.service.filter(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            warn!(error = %e, "Filter request failed");
            Err(e.into())
        }
    }
}

/// Malformed JSON is a validation failure; anything that stopped the body
/// being read at all keeps the status axum assigned it.
fn body_rejection(rejection: JsonRejection) -> ApiError {
    let fields = vec![FieldError::new("body", &rejection.body_text())];
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            ApiError::Validation(fields)
        }
        other => ApiError::Rejected {
            status: other.status(),
            fields,
        },
    }
}
