use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    dto::generation_dto::{
        ExamBody, FinalExamPayload, FinalExamResponse, GenerateQuizPayload, GenerateQuizResponse,
        TopicsPayload, TopicsResponse, DEFAULT_EXAM_QUESTIONS, DEFAULT_QUIZ_QUESTIONS,
    },
    error::{Error, Result},
    services::generation_service::Origin,
    utils::{
        extract::AppJson,
        validation::{split_comma_list, validate},
    },
    AppState,
};

fn question_count(requested: Option<usize>, default: usize, max: usize) -> Result<usize> {
    match requested {
        None => Ok(default.min(max)),
        Some(n) if n > max => Err(Error::BadRequest(format!(
            "questionCount must be between 1 and {}",
            max
        ))),
        Some(n) => Ok(n),
    }
}

fn outcome_message(subject: &str, origin: Origin) -> String {
    match origin {
        Origin::Ai => format!("{} generated successfully", subject),
        Origin::Fallback => format!("{} generated using fallback method", subject),
    }
}

#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateQuizPayload,
    responses(
        (status = 200, description = "Quiz generated", body = Json<GenerateQuizResponse>),
        (status = 400, description = "Missing topic or file content"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    AppJson(payload): AppJson<GenerateQuizPayload>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;
    let (topic, file_content) = match (payload.topic, payload.file_content) {
        (Some(topic), Some(content)) if !content.trim().is_empty() => (topic, content),
        _ => {
            return Err(Error::BadRequest(
                "Topic and file content are required".to_string(),
            ))
        }
    };
    if !topic.has_title() {
        return Err(Error::BadRequest("Topic title is required".to_string()));
    }
    let count = question_count(payload.question_count, DEFAULT_QUIZ_QUESTIONS, state.max_questions)?;

    tracing::info!(topic_id = %topic.id, count, "Generating quiz");
    let generated = state
        .generation_service
        .generate_quiz(&topic, &file_content, count)
        .await;

    Ok(Json(GenerateQuizResponse {
        success: true,
        questions: generated.items,
        topic,
        message: outcome_message("Quiz", generated.origin),
    }))
}

#[utoipa::path(
    post,
    path = "/api/final-exam",
    request_body = FinalExamPayload,
    responses(
        (status = 200, description = "Final exam generated", body = Json<FinalExamResponse>),
        (status = 400, description = "Missing topics or file content"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn generate_final_exam(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FinalExamPayload>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;
    let (Some(topics), Some(file_content)) = (payload.topics, payload.file_content) else {
        return Err(Error::BadRequest(
            "Topics and file content are required".to_string(),
        ));
    };
    if topics.is_empty() {
        return Err(Error::BadRequest("Topics must be a non-empty array".to_string()));
    }
    if file_content.trim().is_empty() {
        return Err(Error::BadRequest(
            "File content must be a non-empty string".to_string(),
        ));
    }
    if !topics.iter().all(|t| t.has_title()) {
        return Err(Error::BadRequest("Topic title is required".to_string()));
    }
    let count = question_count(payload.question_count, DEFAULT_EXAM_QUESTIONS, state.max_questions)?;

    tracing::info!(topics = topics.len(), count, "Generating final exam");
    let batch = state
        .generation_service
        .generate_final_exam(&topics, &file_content, count)
        .await;

    Ok(Json(FinalExamResponse {
        success: true,
        exam: ExamBody {
            questions: batch.questions,
            unique_question_ids: batch.unique_question_ids,
        },
        message: outcome_message("Final exam", batch.origin),
    }))
}

#[utoipa::path(
    post,
    path = "/api/topics",
    request_body = TopicsPayload,
    responses(
        (status = 200, description = "One topic per requested name", body = Json<TopicsResponse>),
        (status = 400, description = "No topics requested"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn generate_topics(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TopicsPayload>,
) -> Result<impl IntoResponse> {
    let user_topics = payload.user_topics.unwrap_or_default();
    let names = split_comma_list(&user_topics);
    if names.is_empty() {
        return Err(Error::BadRequest(
            "User topics are required. Please specify the topics you want to focus on."
                .to_string(),
        ));
    }

    tracing::info!(count = names.len(), "Discovering topics");
    let generated = state
        .generation_service
        .discover_topics(user_topics.trim(), &names)
        .await;

    Ok(Json(TopicsResponse {
        success: true,
        topics: generated.items,
        message: outcome_message("Topics", generated.origin),
    }))
}
