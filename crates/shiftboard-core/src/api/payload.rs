use std::fmt;

use serde_json::Value;

/// A response body as the backend sent it: JSON when it parses, raw text
/// otherwise. Endpoints are free to answer with either.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Optimistically parse `text` as JSON, keeping the raw text on failure.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text),
        }
    }

    /// True for bodies that should clear an output panel rather than fill it
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(Value::Null) => true,
            Payload::Json(Value::String(s)) => s.is_empty(),
            Payload::Json(_) => false,
            Payload::Text(s) => s.is_empty(),
        }
    }

    /// The raw text, if the body was not JSON
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Json(_) => None,
        }
    }

    /// The body as a plain string: raw text, or a JSON string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Text(s) | Payload::Json(Value::String(s)) => Some(s),
            Payload::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    /// Render for display: pretty-printed JSON (two-space indent) or the
    /// text unchanged. Empty payloads render as an empty string.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match self {
            Payload::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Payload::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
