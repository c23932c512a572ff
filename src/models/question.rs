use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillBlank,
}

impl QuestionType {
    /// Accepts the canonical names plus the spellings models tend to produce.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "multiple_choice" | "mcq" | "multiplechoice" => Some(QuestionType::MultipleChoice),
            "true_false" | "boolean" | "truefalse" | "true_or_false" => Some(QuestionType::TrueFalse),
            "fill_blank" | "fill_in_the_blank" | "fill_in_blank" | "fillblank" => {
                Some(QuestionType::FillBlank)
            }
            _ => None,
        }
    }
}

/// Expected answer: an option index for multiple choice and true/false
/// (`0` = True, `1` = False), the literal text for fill-in-the-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: CorrectAnswer,
    pub explanation: String,
}

pub const BLANK_MARKER: &str = "_____";
pub const MULTIPLE_CHOICE_OPTIONS: usize = 4;
