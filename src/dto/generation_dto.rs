use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::models::topic::Topic;

pub const DEFAULT_QUIZ_QUESTIONS: usize = 5;
pub const DEFAULT_EXAM_QUESTIONS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizPayload {
    pub topic: Option<Topic>,
    pub file_content: Option<String>,
    #[validate(range(min = 1))]
    pub question_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub topic: Topic,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinalExamPayload {
    pub topics: Option<Vec<Topic>>,
    pub file_content: Option<String>,
    #[validate(range(min = 1))]
    pub question_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamBody {
    pub questions: Vec<Question>,
    pub unique_question_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalExamResponse {
    pub success: bool,
    pub exam: ExamBody,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsPayload {
    pub user_topics: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsResponse {
    pub success: bool,
    pub topics: Vec<Topic>,
    pub message: String,
}
