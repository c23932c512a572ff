use crate::models::question::Question;
use crate::models::topic::Topic;
use crate::services::fallback_service::fallback_questions;

pub const EXAM_TRACKING_PREFIX: &str = "exam";

/// Tops up a short list with fallback questions, truncates to `count` and
/// renumbers ids to positions `1..=count`.
pub fn reconcile_questions(mut questions: Vec<Question>, count: usize, topics: &[Topic]) -> Vec<Question> {
    if questions.len() < count {
        let shortfall = count - questions.len();
        tracing::debug!(shortfall, "Topping up with fallback questions");
        questions.extend(fallback_questions(topics, shortfall));
    }
    questions.truncate(count);
    for (idx, q) in questions.iter_mut().enumerate() {
        q.id = idx as u32 + 1;
    }
    questions
}

/// Per-question tracking ids for an exam batch: `exam_<millis>_<position>`.
pub fn tracking_ids(len: usize, timestamp_millis: i64) -> Vec<String> {
    (1..=len)
        .map(|pos| format!("{}_{}_{}", EXAM_TRACKING_PREFIX, timestamp_millis, pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{CorrectAnswer, QuestionType};
    use crate::models::topic::Difficulty;

    fn topic() -> Topic {
        Topic {
            id: "t1".into(),
            title: "Photosynthesis".into(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            key_concepts: None,
            quiz_count: None,
        }
    }

    fn ai_question(id: u32) -> Question {
        Question {
            id,
            question_type: QuestionType::MultipleChoice,
            question: format!("AI question {}", id),
            options: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            correct_answer: CorrectAnswer::Index(2),
            explanation: "because".into(),
        }
    }

    #[test]
    fn tops_up_and_renumbers() {
        let out = reconcile_questions(vec![ai_question(9), ai_question(4), ai_question(4)], 5, &[topic()]);
        assert_eq!(out.len(), 5);
        assert_eq!(out.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(out[0].question, "AI question 9");
        assert_eq!(out[3].question_type, QuestionType::TrueFalse);
        assert_eq!(out[4].question_type, QuestionType::FillBlank);
    }

    #[test]
    fn truncates_surplus() {
        let many: Vec<_> = (1..=8).map(ai_question).collect();
        let out = reconcile_questions(many, 5, &[topic()]);
        assert_eq!(out.len(), 5);
        assert_eq!(out[4].question, "AI question 5");
    }

    #[test]
    fn reconciling_twice_is_a_no_op() {
        let once = reconcile_questions(vec![ai_question(3)], 5, &[topic()]);
        let twice = reconcile_questions(once.clone(), 5, &[topic()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn tracking_ids_are_positional() {
        assert_eq!(
            tracking_ids(3, 1700000000000),
            vec![
                "exam_1700000000000_1",
                "exam_1700000000000_2",
                "exam_1700000000000_3"
            ]
        );
    }
}
