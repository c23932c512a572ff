use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::results_dto::{
        ProgressQuery, ProgressResponse, ResultsListResponse, ResultsQuery, SubmitResultRequest,
    },
    error::Result,
    utils::{extract::AppJson, validation::split_comma_list},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = SubmitResultRequest,
    responses(
        (status = 201, description = "Result graded and stored", body = Json<crate::models::quiz_result::QuizResult>),
        (status = 400, description = "Missing questions or topic id")
    )
)]
#[axum::debug_handler]
pub async fn submit_result(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitResultRequest>,
) -> Result<impl IntoResponse> {
    let stored = state.results_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    get,
    path = "/api/results",
    params(
        ("topicId" = Option<String>, Query, description = "Only results for this topic"),
        ("finalExam" = Option<bool>, Query, description = "Only final exams (true) or only quizzes (false)")
    ),
    responses(
        (status = 200, description = "Stored results in submission order", body = Json<ResultsListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<impl IntoResponse> {
    let results = state.results_service.list(&query.into()).await?;
    Ok(Json(ResultsListResponse { results }))
}

#[utoipa::path(
    get,
    path = "/api/progress",
    params(
        ("topicIds" = Option<String>, Query, description = "Comma-separated topic ids")
    ),
    responses(
        (status = 200, description = "Per-topic progress and overall score", body = Json<ProgressResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<impl IntoResponse> {
    let topic_ids = query
        .topic_ids
        .as_deref()
        .map(split_comma_list)
        .unwrap_or_default();
    let (topics, overall_score) = state.results_service.progress(&topic_ids).await?;
    Ok(Json(ProgressResponse {
        topics,
        overall_score,
    }))
}
