pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    ai_service::{CompletionClient, GeminiClient},
    generation_service::GenerationService,
    results_service::{
        MemoryResultsRepository, PgResultsRepository, ResultsRepository, ResultsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: GenerationService,
    pub results_service: ResultsService,
    pub max_questions: usize,
}

impl AppState {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        repo: Arc<dyn ResultsRepository>,
        max_questions: usize,
    ) -> Self {
        Self {
            generation_service: GenerationService::new(client),
            results_service: ResultsService::new(repo),
            max_questions,
        }
    }

    /// Wires the Gemini client and picks Postgres storage when a database
    /// URL is configured, running migrations first.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;
        let client = GeminiClient::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            http_client,
        );
        if config.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; every generation will use the fallback method");
        }

        let repo: Arc<dyn ResultsRepository> = match &config.database_url {
            Some(url) => {
                let pool = database::pool::create_pool(url).await?;
                database::pool::run_migrations(&pool).await?;
                Arc::new(PgResultsRepository::new(pool))
            }
            None => {
                tracing::info!("DATABASE_URL is not set; results are kept in memory");
                Arc::new(MemoryResultsRepository::new())
            }
        };

        Ok(Self::new(Arc::new(client), repo, config.max_questions))
    }
}
