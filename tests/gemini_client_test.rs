use std::collections::HashMap;

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use quiz_generator::{
    error::AiError,
    services::ai_service::{CompletionClient, GeminiClient, GenerationParams},
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/generate", addr)
}

fn client_for(url: String) -> GeminiClient {
    GeminiClient::new(url, Some("test-key".to_string()), reqwest::Client::new())
}

async fn echo_prompt(
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<JsonValue>,
) -> impl IntoResponse {
    if query.get("key").map(String::as_str) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap_or(-1.0);
    let tokens = body["generationConfig"]["maxOutputTokens"].as_u64().unwrap_or(0);
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {"parts": [{"text": format!("{prompt}|{temperature:.1}|{tokens}")}]}
            }]
        })),
    )
}

#[tokio::test]
async fn returns_first_candidate_text() {
    let url = serve(Router::new().route("/generate", post(echo_prompt))).await;
    let client = client_for(url);

    let text = assert_ok!(client.complete("hello", &GenerationParams::TOPICS).await);
    assert_eq!(text, "hello|0.7|2048");
}

#[tokio::test]
async fn non_success_status_is_a_service_error() {
    let url = serve(Router::new().route(
        "/generate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model overloaded") }),
    ))
    .await;

    let err = assert_err!(client_for(url).complete("hi", &GenerationParams::QUESTIONS).await);
    match err {
        AiError::Service { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("overloaded"));
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_envelope_is_malformed() {
    let url = serve(Router::new().route(
        "/generate",
        post(|| async { Json(json!({"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}})) }),
    ))
    .await;
    let err = assert_err!(client_for(url).complete("hi", &GenerationParams::QUESTIONS).await);
    assert!(matches!(err, AiError::MalformedResponse(_)));

    let url = serve(Router::new().route("/generate", post(|| async { "not json" }))).await;
    let err = assert_err!(client_for(url).complete("hi", &GenerationParams::QUESTIONS).await);
    assert!(matches!(err, AiError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/generate", addr));
    let err = assert_err!(client.complete("hi", &GenerationParams::QUESTIONS).await);
    assert!(matches!(err, AiError::Transport(_)));
}
