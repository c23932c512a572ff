use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::progress::TopicProgress;
use crate::models::question::Question;
use crate::models::quiz_result::{AnswerValue, QuizResult, ResultFilter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub topic_id: Option<String>,
    pub quiz_id: Option<String>,
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub user_answers: BTreeMap<u32, AnswerValue>,
    pub is_final_exam: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub topic_id: Option<String>,
    pub final_exam: Option<bool>,
}

impl From<ResultsQuery> for ResultFilter {
    fn from(q: ResultsQuery) -> Self {
        ResultFilter {
            topic_id: q.topic_id.filter(|t| !t.trim().is_empty()),
            final_exam: q.final_exam,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsListResponse {
    pub results: Vec<QuizResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub topic_ids: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub topics: Vec<TopicProgress>,
    pub overall_score: u32,
}
