use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AiError;

/// Sampling settings sent with every completion request. Each generation
/// profile uses one fixed set; they are not tunable per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    pub const QUESTIONS: GenerationParams = GenerationParams {
        temperature: 0.9,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 4096,
    };

    pub const TOPICS: GenerationParams = GenerationParams {
        temperature: 0.7,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 2048,
    };
}

/// A black-box text-completion service: one prompt in, the first
/// candidate's text out. Implementations make a single attempt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, AiError>;

    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationParams,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, AiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AiError::Service {
                status: 401,
                body: "GEMINI_API_KEY is not configured".to_string(),
            });
        };

        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: params,
        };

        tracing::debug!(prompt_len = prompt.len(), "Sending completion request");
        let res = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(AiError::Service { status, body });
        }

        let body: JsonValue = res
            .json()
            .await
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        candidate_text(&body)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
pub fn candidate_text(body: &JsonValue) -> Result<String, AiError> {
    let text = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| {
            AiError::MalformedResponse("missing candidates[0].content.parts[0].text".to_string())
        })?;

    if text.trim().is_empty() {
        return Err(AiError::MalformedResponse("empty candidate text".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_first_candidate_text() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        });
        assert_eq!(candidate_text(&body).unwrap(), "first");
    }

    #[test]
    fn missing_envelope_is_malformed() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"finishReason": "SAFETY"}]}),
            json!({"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": "   "}]}}]}),
        ] {
            assert!(matches!(
                candidate_text(&body),
                Err(AiError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn request_body_follows_contract() {
        let params = GenerationParams::TOPICS;
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: &params,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[tokio::test]
    async fn unconfigured_key_fails_without_network() {
        let client = GeminiClient::new("http://127.0.0.1:9".into(), None, Client::new());
        assert!(!client.is_configured());
        let err = client
            .complete("prompt", &GenerationParams::QUESTIONS)
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Service { status: 401, .. }));
    }
}
