use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::question::Question;

/// A submitted answer: an option index (`-1` when skipped) or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(i64),
    Text(String),
}

/// One graded attempt. Results are append-only; each owns a snapshot of
/// the questions it was graded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub topic_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub correct: u32,
    pub total: u32,
    pub date: String,
    pub questions: Vec<Question>,
    pub user_answers: BTreeMap<u32, AnswerValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_final_exam: Option<bool>,
}

impl QuizResult {
    pub fn is_final_exam(&self) -> bool {
        self.is_final_exam.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    pub topic_id: Option<String>,
    pub final_exam: Option<bool>,
}

impl ResultFilter {
    pub fn matches(&self, result: &QuizResult) -> bool {
        if let Some(topic_id) = &self.topic_id {
            if &result.topic_id != topic_id {
                return false;
            }
        }
        match self.final_exam {
            Some(flag) => result.is_final_exam() == flag,
            None => true,
        }
    }
}
