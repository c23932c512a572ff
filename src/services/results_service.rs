use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tokio::sync::RwLock;

use crate::dto::results_dto::SubmitResultRequest;
use crate::error::{Error, Result};
use crate::models::progress::TopicProgress;
use crate::models::quiz_result::{QuizResult, ResultFilter};
use crate::services::grading_service::GradingService;
use crate::services::progress_service::{overall_score, topic_progress};
use crate::utils::time;

pub const FINAL_EXAM_TOPIC_ID: &str = "final-exam";

/// Append-only store of graded attempts. `list_all` returns matches in
/// insertion order.
#[async_trait]
pub trait ResultsRepository: Send + Sync {
    async fn append(&self, entry: QuizResult) -> Result<QuizResult>;

    async fn list_all(&self, filter: &ResultFilter) -> Result<Vec<QuizResult>>;

    fn backend(&self) -> &'static str;
}

#[derive(Default)]
pub struct MemoryResultsRepository {
    entries: RwLock<Vec<QuizResult>>,
}

impl MemoryResultsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultsRepository for MemoryResultsRepository {
    async fn append(&self, entry: QuizResult) -> Result<QuizResult> {
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_all(&self, filter: &ResultFilter) -> Result<Vec<QuizResult>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

pub struct PgResultsRepository {
    pool: PgPool,
}

impl PgResultsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultsRepository for PgResultsRepository {
    async fn append(&self, entry: QuizResult) -> Result<QuizResult> {
        sqlx::query(
            r#"
            INSERT INTO quiz_results (topic_id, quiz_id, is_final_exam, payload)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&entry.topic_id)
        .bind(&entry.quiz_id)
        .bind(entry.is_final_exam())
        .bind(Json(&entry))
        .execute(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn list_all(&self, filter: &ResultFilter) -> Result<Vec<QuizResult>> {
        let rows: Vec<Json<QuizResult>> = sqlx::query_scalar(
            r#"
            SELECT payload FROM quiz_results
            WHERE ($1::text IS NULL OR topic_id = $1)
              AND ($2::bool IS NULL OR is_final_exam = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.topic_id.as_deref())
        .bind(filter.final_exam)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[derive(Clone)]
pub struct ResultsService {
    repo: Arc<dyn ResultsRepository>,
}

impl ResultsService {
    pub fn new(repo: Arc<dyn ResultsRepository>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    /// Grades a submitted attempt and appends it to the log.
    pub async fn submit(&self, payload: SubmitResultRequest) -> Result<QuizResult> {
        let questions = payload.questions.unwrap_or_default();
        if questions.is_empty() {
            return Err(Error::BadRequest("Questions are required".to_string()));
        }

        let is_final_exam = payload.is_final_exam.unwrap_or(false);
        let topic_id = match payload.topic_id.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            Some(id) => id,
            None if is_final_exam => FINAL_EXAM_TOPIC_ID.to_string(),
            None => return Err(Error::BadRequest("Topic id is required".to_string())),
        };

        let now = time::now();
        let quiz_id = payload
            .quiz_id
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| {
                let prefix = if is_final_exam { "final_exam" } else { "quiz" };
                format!("{}_{}", prefix, now.timestamp_millis())
            });

        let score = GradingService::grade(&questions, &payload.user_answers);
        let result = QuizResult {
            topic_id,
            quiz_id,
            score: score.percentage,
            correct: score.correct,
            total: score.total,
            date: time::to_rfc3339(now),
            questions,
            user_answers: payload.user_answers,
            is_final_exam: is_final_exam.then_some(true),
        };

        tracing::info!(
            topic_id = %result.topic_id,
            quiz_id = %result.quiz_id,
            score = result.score,
            "Recording quiz result"
        );
        self.repo.append(result).await
    }

    pub async fn list(&self, filter: &ResultFilter) -> Result<Vec<QuizResult>> {
        self.repo.list_all(filter).await
    }

    /// Progress for each id in `topic_ids`, recomputed from the log.
    pub async fn progress(&self, topic_ids: &[String]) -> Result<(Vec<TopicProgress>, u32)> {
        let results = self
            .repo
            .list_all(&ResultFilter {
                topic_id: None,
                final_exam: Some(false),
            })
            .await?;
        let progress: Vec<TopicProgress> = topic_ids
            .iter()
            .map(|id| topic_progress(id, &results))
            .collect();
        let overall = overall_score(&progress);
        Ok((progress, overall))
    }
}
