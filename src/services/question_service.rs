use serde_json::Value as JsonValue;

use crate::models::question::{
    CorrectAnswer, Question, QuestionType, BLANK_MARKER, MULTIPLE_CHOICE_OPTIONS,
};

/// Phrase that marks a known degenerate fill-in-the-blank output.
const NONSENSE_PATTERN: &str = "understanding understanding";

/// Filters and reshapes loosely-typed candidates into canonical questions.
/// Rejected candidates are dropped silently; survivors keep their relative
/// order and whatever id the source gave them.
pub fn normalize_questions(candidates: &[JsonValue]) -> Vec<Question> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| coerce_question(v, idx))
        .collect()
}

fn non_empty_str(v: &JsonValue, key: &str) -> Option<String> {
    v.get(key)
        .and_then(|s| s.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn correct_answer_field(v: &JsonValue) -> Option<&JsonValue> {
    v.get("correctAnswer").or_else(|| v.get("correct_answer"))
}

fn coerce_question(v: &JsonValue, idx: usize) -> Option<Question> {
    let question = non_empty_str(v, "question")?;
    let explanation = non_empty_str(v, "explanation")?;
    let question_type = v
        .get("type")
        .and_then(|t| t.as_str())
        .and_then(QuestionType::parse_loose)?;
    let answer = correct_answer_field(v);

    let (options, correct_answer) = match question_type {
        QuestionType::FillBlank => {
            if question.matches(BLANK_MARKER).count() > 1 || question.contains(NONSENSE_PATTERN) {
                return None;
            }
            (None, fill_blank_answer(answer?)?)
        }
        QuestionType::MultipleChoice => {
            let options = string_options(v.get("options")?)?;
            if options.len() != MULTIPLE_CHOICE_OPTIONS {
                return None;
            }
            let index = choice_index(answer?, &options)?;
            (Some(options), CorrectAnswer::Index(index))
        }
        QuestionType::TrueFalse => (None, CorrectAnswer::Index(true_false_index(answer?)?)),
    };

    let id = v
        .get("id")
        .and_then(|i| i.as_u64())
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(idx as u32 + 1);

    Some(Question {
        id,
        question_type,
        question,
        options,
        correct_answer,
        explanation,
    })
}

fn string_options(v: &JsonValue) -> Option<Vec<String>> {
    v.as_array()?
        .iter()
        .map(|o| o.as_str().map(|s| s.trim().to_string()))
        .collect()
}

fn choice_index(answer: &JsonValue, options: &[String]) -> Option<u32> {
    let index = match answer {
        JsonValue::Number(n) => n.as_u64()?,
        JsonValue::String(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(i) => i,
                Err(_) => options.iter().position(|o| o.eq_ignore_ascii_case(s))? as u64,
            }
        }
        _ => return None,
    };
    if (index as usize) < options.len() {
        Some(index as u32)
    } else {
        None
    }
}

/// Normalizes a true/false answer to `0` (True) or `1` (False).
pub fn true_false_index(answer: &JsonValue) -> Option<u32> {
    match answer {
        JsonValue::Bool(true) => Some(0),
        JsonValue::Bool(false) => Some(1),
        JsonValue::Number(n) => match n.as_u64()? {
            0 => Some(0),
            1 => Some(1),
            _ => None,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "0" => Some(0),
            "false" | "1" => Some(1),
            _ => None,
        },
        _ => None,
    }
}

fn fill_blank_answer(answer: &JsonValue) -> Option<CorrectAnswer> {
    let text = match answer {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(CorrectAnswer::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mc(correct: JsonValue) -> JsonValue {
        json!({
            "id": 7,
            "type": "multiple_choice",
            "question": "Which organelle performs photosynthesis?",
            "options": ["Chloroplast", "Mitochondrion", "Nucleus", "Ribosome"],
            "correctAnswer": correct,
            "explanation": "Chloroplasts hold chlorophyll."
        })
    }

    #[test]
    fn keeps_valid_multiple_choice_and_its_id() {
        let out = normalize_questions(&[mc(json!(0))]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 7);
        assert_eq!(out[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(out[0].correct_answer, CorrectAnswer::Index(0));
        assert_eq!(out[0].options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn missing_question_or_explanation_is_dropped() {
        let mut no_expl = mc(json!(1));
        no_expl["explanation"] = json!("  ");
        let mut no_text = mc(json!(1));
        no_text.as_object_mut().unwrap().remove("question");
        assert!(normalize_questions(&[no_expl, no_text]).is_empty());
    }

    #[test]
    fn multiple_choice_needs_exactly_four_options_and_in_range_answer() {
        let mut three = mc(json!(0));
        three["options"] = json!(["a", "b", "c"]);
        let mut five = mc(json!(0));
        five["options"] = json!(["a", "b", "c", "d", "e"]);
        let out_of_range = mc(json!(4));
        let negative = mc(json!(-1));
        assert!(normalize_questions(&[three, five, out_of_range, negative]).is_empty());
    }

    #[test]
    fn multiple_choice_answer_given_as_option_text_is_mapped() {
        let out = normalize_questions(&[mc(json!("nucleus"))]);
        assert_eq!(out[0].correct_answer, CorrectAnswer::Index(2));
    }

    #[test]
    fn true_false_accepts_booleans_and_rejects_other_numbers() {
        let tf = |answer: JsonValue| {
            json!({
                "type": "true_false",
                "question": "True or False: plants need light.",
                "correctAnswer": answer,
                "explanation": "They do."
            })
        };
        let out = normalize_questions(&[tf(json!(true)), tf(json!(false)), tf(json!(1)), tf(json!(2)), tf(json!("False"))]);
        let answers: Vec<_> = out.iter().map(|q| q.correct_answer.clone()).collect();
        assert_eq!(
            answers,
            vec![
                CorrectAnswer::Index(0),
                CorrectAnswer::Index(1),
                CorrectAnswer::Index(1),
                CorrectAnswer::Index(1),
            ]
        );
        assert!(out.iter().all(|q| q.options.is_none()));
    }

    #[test]
    fn fill_blank_rejects_multiple_blanks_and_nonsense() {
        let fb = |text: &str| {
            json!({
                "type": "fill_blank",
                "question": text,
                "correctAnswer": "chlorophyll",
                "explanation": "Pigment."
            })
        };
        let out = normalize_questions(&[
            fb("The green pigment is _____."),
            fb("_____ and _____ are pigments."),
            fb("Complete: understanding understanding of _____."),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].correct_answer, CorrectAnswer::Text("chlorophyll".into()));
    }

    #[test]
    fn unknown_type_is_dropped_and_aliases_are_canonicalised() {
        let mut essay = mc(json!(0));
        essay["type"] = json!("essay");
        let mut alias = mc(json!(0));
        alias["type"] = json!("multiple-choice");
        let out = normalize_questions(&[essay, alias]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn preserves_relative_order_and_assigns_position_ids_when_missing() {
        let mut a = mc(json!(0));
        a.as_object_mut().unwrap().remove("id");
        let bad = json!({"type": "multiple_choice"});
        let mut b = mc(json!(3));
        b["question"] = json!("Second?");
        b.as_object_mut().unwrap().remove("id");
        let out = normalize_questions(&[a, bad, b]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[1].id, 3);
        assert_eq!(out[1].question, "Second?");
    }
}
