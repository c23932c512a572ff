use crate::models::progress::TopicProgress;
use crate::models::quiz_result::QuizResult;

/// Aggregates every result for `topic_id`. `results` must be in insertion
/// order; the last matching entry is the most recent attempt.
pub fn topic_progress(topic_id: &str, results: &[QuizResult]) -> TopicProgress {
    let attempts: Vec<&QuizResult> = results.iter().filter(|r| r.topic_id == topic_id).collect();

    let Some(last) = attempts.last() else {
        return TopicProgress {
            topic_id: topic_id.to_string(),
            attempt_count: 0,
            average_score: 0,
            last_attempt_score: 0,
            last_studied: None,
            completed_quizzes: Vec::new(),
        };
    };

    let count = attempts.len() as u32;
    let score_sum: u32 = attempts.iter().map(|r| r.score).sum();

    TopicProgress {
        topic_id: topic_id.to_string(),
        attempt_count: count,
        average_score: rounded_mean(score_sum, count),
        last_attempt_score: last.score,
        last_studied: Some(last.date.clone()),
        completed_quizzes: attempts.iter().map(|r| r.quiz_id.clone()).collect(),
    }
}

/// Rounded mean of the per-topic averages, 0 for no topics.
pub fn overall_score(progress: &[TopicProgress]) -> u32 {
    let sum: u32 = progress.iter().map(|p| p.average_score).sum();
    rounded_mean(sum, progress.len() as u32)
}

fn rounded_mean(sum: u32, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    (f64::from(sum) / f64::from(count)).round() as u32
}
