//! Template-based content used whenever the completion service is down or
//! its output does not survive validation. Everything here is a pure
//! function of its inputs.
//!
//! Fallback answer keys always point at the first option (True for
//! true/false). Stored results depend on this, so it stays as is.

use crate::models::question::{CorrectAnswer, Question, QuestionType, BLANK_MARKER};
use crate::models::topic::{Difficulty, Topic};

const TRUE_FALSE_STATEMENTS: [&str; 4] = [
    "{t} involves specific processes as described in the document.",
    "The mechanisms of {t} require energy input to function properly.",
    "{t} operates through a series of coordinated steps.",
    "Understanding {t} is essential for grasping the overall concept.",
];

const BLANK_SUBJECTS: [&str; 5] = ["process", "mechanism", "function", "structure", "component"];

const MULTIPLE_CHOICE_ASPECTS: [&str; 4] = [
    "primary function",
    "key characteristic",
    "essential component",
    "operating mechanism",
];

/// Type for the n-th question (1-based) of a batch: the cycle starts with
/// true/false, then fill-in-the-blank, then multiple choice.
pub fn fallback_type(question_id: usize) -> QuestionType {
    match question_id.saturating_sub(1) % 3 {
        0 => QuestionType::TrueFalse,
        1 => QuestionType::FillBlank,
        _ => QuestionType::MultipleChoice,
    }
}

/// Synthesizes exactly `count` questions, `ceil(count / topics)` per topic
/// in topic order. Returns an empty list only when `topics` is empty.
pub fn fallback_questions(topics: &[Topic], count: usize) -> Vec<Question> {
    if topics.is_empty() || count == 0 {
        return Vec::new();
    }

    let per_topic = count.div_ceil(topics.len());
    let mut questions = Vec::with_capacity(count);
    let mut question_id = 1usize;

    'topics: for topic in topics {
        for slot in 0..per_topic {
            if question_id > count {
                break 'topics;
            }
            questions.push(template_question(topic, question_id, slot));
            question_id += 1;
        }
    }

    questions
}

fn template_question(topic: &Topic, question_id: usize, slot: usize) -> Question {
    let title = topic.title.trim();
    let lower = title.to_lowercase();

    match fallback_type(question_id) {
        QuestionType::TrueFalse => {
            let statement = TRUE_FALSE_STATEMENTS[slot % TRUE_FALSE_STATEMENTS.len()].replace("{t}", title);
            Question {
                id: question_id as u32,
                question_type: QuestionType::TrueFalse,
                question: format!("True or False: {}", statement),
                options: None,
                correct_answer: CorrectAnswer::Index(0),
                explanation: format!(
                    "This statement is true based on the document content about {}.",
                    title
                ),
            }
        }
        QuestionType::FillBlank => {
            let subject = BLANK_SUBJECTS[slot % BLANK_SUBJECTS.len()];
            Question {
                id: question_id as u32,
                question_type: QuestionType::FillBlank,
                question: format!(
                    "Complete: The {} of {} is essential for understanding {}.",
                    subject,
                    BLANK_MARKER,
                    without_blanks(title)
                ),
                options: None,
                correct_answer: CorrectAnswer::Text(lower),
                explanation: format!(
                    "The {} of {} is fundamental to the topic as described.",
                    subject, title
                ),
            }
        }
        QuestionType::MultipleChoice => {
            let aspect = MULTIPLE_CHOICE_ASPECTS[slot % MULTIPLE_CHOICE_ASPECTS.len()];
            Question {
                id: question_id as u32,
                question_type: QuestionType::MultipleChoice,
                question: format!("What is the {} of {} according to the document?", aspect, title),
                options: Some(vec![
                    format!("To perform {} processes", lower),
                    "To regulate other systems".to_string(),
                    "To provide structural support".to_string(),
                    "To transport materials".to_string(),
                ]),
                correct_answer: CorrectAnswer::Index(0),
                explanation: format!(
                    "This question focuses on the {} of {} as described in the document.",
                    aspect, title
                ),
            }
        }
    }
}

/// The template owns the only blank, so markers inside a title are removed.
fn without_blanks(title: &str) -> String {
    title
        .replace(BLANK_MARKER, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds topics for the user's names starting at `offset`, producing
/// `count` entries. Positions past the supplied names get `Topic <n>`.
pub fn fallback_topics(names: &[String], offset: usize, count: usize) -> Vec<Topic> {
    (offset..offset + count)
        .map(|i| {
            let name = names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Topic {}", i + 1));
            Topic {
                id: format!("fallback_{}", i + 1),
                description: format!(
                    "Comprehensive coverage of {} concepts and principles.",
                    name.to_lowercase()
                ),
                difficulty: Difficulty::ROTATION[i % Difficulty::ROTATION.len()],
                key_concepts: Some(vec![
                    format!("{} fundamentals", name),
                    "Core concepts".to_string(),
                    "Practical applications".to_string(),
                ]),
                quiz_count: Some(crate::services::topic_service::DEFAULT_QUIZ_COUNT),
                title: name,
            }
        })
        .collect()
}
