use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status, AI key presence and storage backend", body = Json<serde_json::Value>)
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "aiConfigured": state.generation_service.ai_configured(),
        "storage": state.results_service.backend(),
    });
    (StatusCode::OK, Json(body))
}
