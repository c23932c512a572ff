use serde::{Deserialize, Serialize};

/// Read-side aggregate over every result recorded for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic_id: String,
    pub attempt_count: u32,
    pub average_score: u32,
    pub last_attempt_score: u32,
    pub last_studied: Option<String>,
    pub completed_quizzes: Vec<String>,
}
