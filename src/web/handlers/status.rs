// GET /: static status payload.
//
// Reports the backend's model identifier; never touches the backend itself,
// so it answers even while the model is down or saturated.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::web::AppState;

pub const STATUS_MESSAGE: &str = "AI Service Operational";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub model: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
        model: state.service.model().to_string(),
    })
}
