use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::routes::{generation, health, results};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        generation::generate_quiz,
        generation::generate_final_exam,
        generation::generate_topics,
        results::submit_result,
        results::list_results,
        results::get_progress,
    ),
    info(title = "Quiz Generator API")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
