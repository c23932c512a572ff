use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::AiError;
use crate::models::question::Question;
use crate::models::topic::Topic;
use crate::services::ai_service::{CompletionClient, GenerationParams};
use crate::services::extraction_service::extract_json;
use crate::services::prompt_service;
use crate::services::question_service::normalize_questions;
use crate::services::reconcile_service::{reconcile_questions, tracking_ids};
use crate::services::topic_service::{normalize_topics, reconcile_topics};
use crate::utils::time;

/// Where a pipeline run is. There is no retry edge: a failure while
/// requesting or parsing goes straight to `FallbackOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Requesting,
    Parsing,
    FallbackOnly,
    Validating,
    Reconciling,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Requesting => "requesting",
            Stage::Parsing => "parsing",
            Stage::FallbackOnly => "fallback_only",
            Stage::Validating => "validating",
            Stage::Reconciling => "reconciling",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Per-call-site settings of the shared pipeline.
#[derive(Debug, Clone, Copy)]
pub struct GenerationProfile {
    pub name: &'static str,
    pub params: GenerationParams,
    /// Key of the item array in the model's JSON answer.
    pub items_key: &'static str,
}

impl GenerationProfile {
    pub const QUIZ: GenerationProfile = GenerationProfile {
        name: "quiz",
        params: GenerationParams::QUESTIONS,
        items_key: "questions",
    };

    pub const FINAL_EXAM: GenerationProfile = GenerationProfile {
        name: "final_exam",
        params: GenerationParams::QUESTIONS,
        items_key: "questions",
    };

    pub const TOPICS: GenerationProfile = GenerationProfile {
        name: "topics",
        params: GenerationParams::TOPICS,
        items_key: "topics",
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The completion service answered with usable JSON (possibly topped up).
    Ai,
    /// The service call or parsing failed; everything came from templates.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub items: Vec<T>,
    pub origin: Origin,
}

#[derive(Debug, Clone)]
pub struct ExamBatch {
    pub questions: Vec<Question>,
    pub unique_question_ids: Vec<String>,
    pub origin: Origin,
}

#[derive(Clone)]
pub struct GenerationService {
    client: Arc<dyn CompletionClient>,
}

impl GenerationService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn ai_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// `count` questions about one topic. Never fails once the caller has
    /// checked the topic has a title.
    pub async fn generate_quiz(&self, topic: &Topic, file_content: &str, count: usize) -> Generated<Question> {
        let prompt = prompt_service::quiz_prompt(topic, file_content, count);
        self.generate_questions(&GenerationProfile::QUIZ, &prompt, std::slice::from_ref(topic), count)
            .await
    }

    pub async fn generate_final_exam(&self, topics: &[Topic], file_content: &str, count: usize) -> ExamBatch {
        let prompt = prompt_service::final_exam_prompt(topics, file_content, count);
        let generated = self
            .generate_questions(&GenerationProfile::FINAL_EXAM, &prompt, topics, count)
            .await;
        let unique_question_ids =
            tracking_ids(generated.items.len(), time::now().timestamp_millis());
        ExamBatch {
            questions: generated.items,
            unique_question_ids,
            origin: generated.origin,
        }
    }

    /// One topic per name in `names`, in order.
    pub async fn discover_topics(&self, user_topics: &str, names: &[String]) -> Generated<Topic> {
        let profile = GenerationProfile::TOPICS;
        let prompt = prompt_service::topics_prompt(user_topics, names.len());

        let (candidates, origin) = self.request_items(&profile, &prompt).await;
        log_stage(&profile, Stage::Validating);
        let topics = normalize_topics(&candidates);
        log_stage(&profile, Stage::Reconciling);
        let topics = reconcile_topics(topics, names);
        log_stage(&profile, Stage::Done);

        Generated { items: topics, origin }
    }

    async fn generate_questions(
        &self,
        profile: &GenerationProfile,
        prompt: &str,
        topics: &[Topic],
        count: usize,
    ) -> Generated<Question> {
        let (candidates, origin) = self.request_items(profile, prompt).await;

        log_stage(profile, Stage::Validating);
        let validated = normalize_questions(&candidates);
        tracing::debug!(
            profile = profile.name,
            received = candidates.len(),
            kept = validated.len(),
            "Validated candidate questions"
        );

        log_stage(profile, Stage::Reconciling);
        let questions = reconcile_questions(validated, count, topics);
        log_stage(profile, Stage::Done);

        Generated { items: questions, origin }
    }

    /// Requesting and parsing. Any failure is logged and yields no
    /// candidates so the reconciler fills the whole batch from templates.
    async fn request_items(&self, profile: &GenerationProfile, prompt: &str) -> (Vec<JsonValue>, Origin) {
        match self.fetch_items(profile, prompt).await {
            Ok(items) => (items, Origin::Ai),
            Err(e) => {
                tracing::warn!(profile = profile.name, error = %e, "AI generation failed, using fallback method");
                log_stage(profile, Stage::FallbackOnly);
                (Vec::new(), Origin::Fallback)
            }
        }
    }

    async fn fetch_items(&self, profile: &GenerationProfile, prompt: &str) -> Result<Vec<JsonValue>, AiError> {
        log_stage(profile, Stage::Requesting);
        let raw = self.client.complete(prompt, &profile.params).await?;
        log_stage(profile, Stage::Parsing);
        extract_json(&raw).into_items(profile.items_key)
    }
}

fn log_stage(profile: &GenerationProfile, stage: Stage) {
    tracing::debug!(profile = profile.name, stage = %stage, "Generation stage");
}
