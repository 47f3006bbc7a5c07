//! Lenient parsing of raw model replies
//!
//! Model output is untrusted text. This module strips code fences, parses the
//! JSON object, and pulls out the fields the normalizer needs without letting
//! a single odd field reject the whole reply. Field-level problems are
//! collected as violations instead.

use domain::{CategoryScores, ScoreCategory, Severity};
use serde_json::{Map, Value};
use thiserror::Error;

/// Severity substituted for a score that is present but not a number
const UNREADABLE_SCORE: Severity = Severity::clamped(1);

/// Reply could not be read as a JSON object at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Reply was empty after stripping fences
    #[error("Model reply is empty")]
    Empty,

    /// Reply is not valid JSON
    #[error("Model reply is not valid JSON: {0}")]
    InvalidJson(String),

    /// Reply is JSON but not an object
    #[error("Model reply is not a JSON object")]
    NotAnObject,
}

/// Fields read from a model reply, before taxonomy rules are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelVerdict {
    /// Rating label exactly as the model wrote it
    pub rating: Option<String>,
    /// `reasons` or `factors` array, order preserved
    pub reasons: Option<Vec<String>>,
    pub summary: Option<String>,
    pub scores: Option<CategoryScores>,
    pub recommendation: Option<String>,
    /// Confidence, already restricted to [0, 1]
    pub confidence: Option<f64>,
    /// Field-level schema problems found while reading
    pub violations: Vec<String>,
}

impl ModelVerdict {
    /// Whether the reply deviated from the expected schema
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Whether the text after an opening fence is a language tag like `json` or `js`
fn is_fence_tag(line: &str) -> bool {
    let line = line.trim();
    !line.contains(char::is_whitespace) && !line.contains(['{', '[', '"'])
}

/// Remove a surrounding Markdown code fence and its language tag, if any
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.split_once('\n') {
        Some((tag, body)) if is_fence_tag(tag) => body,
        Some(_) => rest,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let rest = rest.trim_end().strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Slice from the first `{` to the last `}` if the text has prose around it
fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a raw model reply into a verdict
pub fn parse_model_output(raw: &str) -> Result<ModelVerdict, ParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }

    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(err) => embedded_object(cleaned)
            .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
            .ok_or_else(|| ParseError::InvalidJson(err.to_string()))?,
    };

    let Value::Object(object) = value else {
        return Err(ParseError::NotAnObject);
    };

    Ok(read_verdict(&object))
}

fn read_verdict(object: &Map<String, Value>) -> ModelVerdict {
    let mut verdict = ModelVerdict::default();

    match object.get("rating") {
        Some(Value::String(label)) => verdict.rating = Some(label.clone()),
        Some(other) if !other.is_null() => {
            verdict.violations.push(format!("rating is not a string: {other}"));
        },
        _ => {},
    }

    let explanation = object
        .get("reasons")
        .filter(|v| !v.is_null())
        .map(|v| ("reasons", v))
        .or_else(|| object.get("factors").filter(|v| !v.is_null()).map(|v| ("factors", v)));
    if let Some((key, value)) = explanation {
        verdict.reasons = read_string_list(key, value, &mut verdict.violations);
    }

    verdict.summary = non_empty_string(object.get("summary"));
    verdict.recommendation = non_empty_string(object.get("recommendation"));
    verdict.confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| (0.0..=1.0).contains(c));

    match object.get("scores") {
        Some(Value::Object(scores)) => {
            verdict.scores = Some(read_scores(scores, &mut verdict.violations));
        },
        Some(Value::Null) | None => {},
        Some(other) => verdict
            .violations
            .push(format!("scores is not an object: {other}")),
    }

    verdict
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn read_string_list(key: &str, value: &Value, violations: &mut Vec<String>) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        violations.push(format!("{key} is not an array"));
        return None;
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(text) => list.push(text.clone()),
            other => violations.push(format!("{key} contains a non-string item: {other}")),
        }
    }
    Some(list)
}

fn read_scores(scores: &Map<String, Value>, violations: &mut Vec<String>) -> CategoryScores {
    let mut result = CategoryScores::default();

    for category in ScoreCategory::ALL {
        let severity = match scores.get(category.key()) {
            None | Some(Value::Null) => Severity::NONE,
            Some(value) => match value.as_f64().and_then(Severity::from_f64) {
                Some(severity) => severity,
                None => {
                    violations.push(format!("score for {category} is not a number: {value}"));
                    UNREADABLE_SCORE
                },
            },
        };
        result.set(category, severity);
    }

    result
}
