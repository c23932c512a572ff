#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use quiz_generator::{
    error::AiError,
    middleware::cors::permissive_cors,
    routes::app_router,
    services::{
        ai_service::{CompletionClient, GenerationParams},
        results_service::MemoryResultsRepository,
    },
    AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

/// Completion client that answers every prompt the same way.
pub struct ScriptedClient {
    reply: Option<String>,
}

impl ScriptedClient {
    pub fn failing() -> Self {
        Self { reply: None }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
        }
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, AiError> {
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(AiError::Service {
                status: 503,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

pub fn app_with_rps(client: ScriptedClient, rps: u32) -> Router {
    let state = AppState::new(
        Arc::new(client),
        Arc::new(MemoryResultsRepository::new()),
        50,
    );
    app_router(state, rps, permissive_cors())
}

pub fn app(client: ScriptedClient) -> Router {
    app_with_rps(client, 10_000)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, HeaderMap, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, headers, json)
}
