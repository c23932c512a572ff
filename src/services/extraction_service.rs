use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::error::AiError;

/// Outcome of looking for JSON inside free-form model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(JsonValue),
    NotFound,
    Invalid(String),
}

fn object_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"))
}

fn array_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("array pattern is valid"))
}

/// Best-effort JSON recovery: the span from the first `{` to the last `}`,
/// or failing that from the first `[` to the last `]`. Surrounding prose and
/// markdown fences are ignored; anything cleverer is out of scope.
pub fn extract_json(raw: &str) -> Extraction {
    let candidate = object_pattern()
        .find(raw)
        .or_else(|| array_pattern().find(raw));

    match candidate {
        Some(m) => match serde_json::from_str::<JsonValue>(m.as_str()) {
            Ok(value) => Extraction::Parsed(value),
            Err(e) => Extraction::Invalid(e.to_string()),
        },
        None => Extraction::NotFound,
    }
}

impl Extraction {
    /// Returns the item array stored under `key`, accepting a bare array as
    /// if it had been wrapped as `{key: [...]}`.
    pub fn into_items(self, key: &str) -> Result<Vec<JsonValue>, AiError> {
        match self {
            Extraction::Parsed(JsonValue::Array(items)) => Ok(items),
            Extraction::Parsed(JsonValue::Object(mut map)) => match map.remove(key) {
                Some(JsonValue::Array(items)) => Ok(items),
                _ => Err(AiError::Parse(format!("missing `{}` array", key))),
            },
            Extraction::Parsed(_) => Err(AiError::Parse("not an object or array".to_string())),
            Extraction::NotFound => Err(AiError::Extraction),
            Extraction::Invalid(reason) => Err(AiError::Parse(reason)),
        }
    }
}
