use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::models::topic::Topic;
use crate::services::fallback_service::fallback_topics;

/// Quizzes suggested per discovered topic.
pub const DEFAULT_QUIZ_COUNT: u32 = 5;

/// Keeps candidates that deserialize as topics and carry a title,
/// description, difficulty and key concepts.
pub fn normalize_topics(candidates: &[JsonValue]) -> Vec<Topic> {
    candidates
        .iter()
        .filter(|v| v.get("difficulty").is_some_and(|d| !d.is_null()))
        .filter_map(|v| serde_json::from_value::<Topic>(v.clone()).ok())
        .filter(|t| {
            t.has_title()
                && !t.description.trim().is_empty()
                && t.key_concepts.as_ref().is_some_and(|c| !c.is_empty())
        })
        .map(|mut t| {
            t.title = t.title.trim().to_string();
            t.quiz_count = Some(DEFAULT_QUIZ_COUNT);
            t
        })
        .collect()
}

/// Tops `topics` up with fallback topics for the names not yet covered,
/// truncates to one topic per name and makes every id unique.
pub fn reconcile_topics(mut topics: Vec<Topic>, names: &[String]) -> Vec<Topic> {
    let wanted = names.len();
    if topics.len() < wanted {
        let missing = wanted - topics.len();
        topics.extend(fallback_topics(names, topics.len(), missing));
    }
    topics.truncate(wanted);

    let mut seen = HashSet::new();
    for (idx, topic) in topics.iter_mut().enumerate() {
        let id = topic.id.trim().to_string();
        if id.is_empty() || !seen.insert(id.clone()) {
            let mut n = idx + 1;
            let mut candidate = format!("topic_{}", n);
            while seen.contains(&candidate) {
                n += wanted;
                candidate = format!("topic_{}", n);
            }
            seen.insert(candidate.clone());
            topic.id = candidate;
        } else {
            topic.id = id;
        }
    }
    topics
}
