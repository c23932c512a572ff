pub mod docs;
pub mod generation;
pub mod health;
pub mod results;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::rate_limit::{new_rps_state, rps_middleware};
use crate::AppState;

/// Largest accepted request body; documents travel inline as `fileContent`.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn app_router(state: AppState, public_rps: u32, cors: CorsLayer) -> Router {
    let generation_api = Router::new()
        .route("/api/generate", post(generation::generate_quiz))
        .route("/api/final-exam", post(generation::generate_final_exam))
        .route("/api/topics", post(generation::generate_topics))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(public_rps),
            rps_middleware,
        ));

    let results_api = Router::new()
        .route(
            "/api/results",
            get(results::list_results).post(results::submit_result),
        )
        .route("/api/progress", get(results::get_progress));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(generation_api)
        .merge(results_api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
