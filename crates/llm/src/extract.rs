//! Response normalization
//!
//! Providers answer with a handful of shapes. Each shape is an
//! [`ExtractionRule`]; rules run in [`EXTRACTION_RULES`] order and the first
//! match wins. A body no rule recognizes extracts to an empty string.

use serde_json::Value;

/// Provider response body, split by declared content type
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/json` body
    Json(Value),
    /// Anything else, kept as opaque text
    Text(String),
    /// Declared `application/json` but failed to parse
    Malformed,
}

impl ResponseBody {
    /// Body as a JSON value; text bodies become a JSON string, malformed ones null
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Malformed => Value::Null,
        }
    }

    /// Top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Json(value) => value.get(name),
            Self::Text(_) | Self::Malformed => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(Value::String(s)) | Self::Text(s) => Some(s),
            Self::Json(_) | Self::Malformed => None,
        }
    }
}

/// A single way of locating generated text in a provider body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// The whole body is a string
    PlainString,
    /// `{ "text": "..." }`
    TextField,
    /// `{ "choices": [{ "text": "..." }] }`
    FirstChoiceText,
    /// `{ "output": ... }`, coerced to a string
    OutputField,
}

/// Rules in the order they are tried
pub const EXTRACTION_RULES: [ExtractionRule; 4] = [
    ExtractionRule::PlainString,
    ExtractionRule::TextField,
    ExtractionRule::FirstChoiceText,
    ExtractionRule::OutputField,
];

impl ExtractionRule {
    /// Try this rule against `body`
    pub fn apply(self, body: &ResponseBody) -> Option<String> {
        match self {
            Self::PlainString => body.as_str().map(str::to_string),
            Self::TextField => body.field("text").and_then(non_empty_str),
            Self::FirstChoiceText => body
                .field("choices")
                .and_then(Value::as_array)
                .and_then(|choices| choices.first())
                .and_then(|choice| choice.get("text"))
                .and_then(non_empty_str),
            Self::OutputField => body.field("output").and_then(coerce_truthy),
        }
    }
}

/// Extract generated text, defaulting to an empty string
pub fn extract_text(body: &ResponseBody) -> String {
    EXTRACTION_RULES
        .iter()
        .find_map(|rule| rule.apply(body))
        .unwrap_or_default()
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String form of a truthy value; null, false, zero and "" do not count
fn coerce_truthy(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
