use std::collections::BTreeMap;

use crate::models::question::{CorrectAnswer, Question, QuestionType};
use crate::models::quiz_result::AnswerValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

pub struct GradingService;

impl GradingService {
    /// Counts correct answers keyed by question id. Missing answers and the
    /// `-1` "skipped" sentinel count as wrong.
    pub fn grade(questions: &[Question], answers: &BTreeMap<u32, AnswerValue>) -> Score {
        let total = questions.len() as u32;
        let correct = questions
            .iter()
            .filter(|q| {
                answers
                    .get(&q.id)
                    .is_some_and(|answer| Self::is_correct(q, answer))
            })
            .count() as u32;

        Score {
            correct,
            total,
            percentage: percentage(correct, total),
        }
    }

    pub fn is_correct(question: &Question, answer: &AnswerValue) -> bool {
        match (&question.question_type, &question.correct_answer, answer) {
            (QuestionType::FillBlank, CorrectAnswer::Text(expected), AnswerValue::Text(given)) => {
                given.trim().to_lowercase() == expected.trim().to_lowercase()
            }
            (
                QuestionType::MultipleChoice | QuestionType::TrueFalse,
                CorrectAnswer::Index(expected),
                AnswerValue::Index(given),
            ) => *given >= 0 && *given == i64::from(*expected),
            _ => false,
        }
    }
}

/// `round(correct / total * 100)`, or 0 for an empty quiz.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) * 100.0 / f64::from(total)).round() as u32
}
