//! Raw query payloads and their unwrapping into a single working shape.
//!
//! Callers may send the query as a bare string, as an object carrying
//! `text`, or as loose top-level fields. [`RawQuery::unwrap_input`] folds all
//! three into one [`WorkingInput`] so the rest of the pipeline sees one shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NormalizerError, Result};

/// An untyped query payload. No schema is enforced; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawQuery(Value);

impl RawQuery {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A payload of the form `{"query": text}`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("query".to_string(), Value::String(text.into()));
        Self(Value::Object(map))
    }

    /// Parse a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::InvalidInput`] if `json` is not valid JSON.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map(Self)
            .map_err(|e| NormalizerError::InvalidInput(e.to_string()))
    }

    /// Unwrap the payload into the working input.
    ///
    /// - `query` is an object: that object is the working input.
    /// - `query` is a non-empty string: the working input is `{text: query}`.
    /// - otherwise: the payload itself.
    ///
    /// Top-level siblings of `query` fill in keys the unwrapped object lacks,
    /// so `{"query": "show trash", "user_id": "u"}` and
    /// `{"query": {"text": "show trash", "user_id": "u"}}` behave the same.
    pub fn unwrap_input(&self) -> WorkingInput {
        let Value::Object(top) = &self.0 else {
            // Arrays, scalars and null carry no fields.
            return WorkingInput::default();
        };

        let mut fields = match top.get("query") {
            Some(Value::Object(inner)) => inner.clone(),
            Some(Value::String(text)) if !text.is_empty() => {
                let mut map = Map::new();
                map.insert("text".to_string(), Value::String(text.clone()));
                map
            }
            _ => return WorkingInput { fields: top.clone() },
        };

        for (key, value) in top {
            if key != "query" && !fields.contains_key(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
        WorkingInput { fields }
    }
}

/// The unwrapped payload every resolution step reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingInput {
    fields: Map<String, Value>,
}

impl WorkingInput {
    /// A field's value when it is a non-empty string.
    fn string_field(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.string_field("text")
    }

    pub fn query(&self) -> Option<&str> {
        self.string_field("query")
    }

    pub fn operation(&self) -> Option<&str> {
        self.string_field("operation")
    }

    pub fn start(&self) -> Option<&str> {
        self.string_field("start")
    }

    pub fn end(&self) -> Option<&str> {
        self.string_field("end")
    }

    /// The caller's user identifier. Non-string scalars are rendered as text.
    pub fn user_id(&self) -> Option<String> {
        match self.fields.get("user_id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Text used for the deletions check: `text`, else `query`, else empty.
    pub fn intent_text(&self) -> &str {
        self.text().or_else(|| self.query()).unwrap_or("")
    }

    /// Text used for date resolution: `text`, else `query`, else the whole
    /// working input serialized as JSON.
    pub fn query_text(&self) -> String {
        match self.text().or_else(|| self.query()) {
            Some(text) => text.to_string(),
            None => Value::Object(self.fields.clone()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_query_becomes_text() {
        let input = RawQuery::from_text("tomorrow").unwrap_input();
        assert_eq!(input.text(), Some("tomorrow"));
        assert_eq!(input.query(), None);
        assert_eq!(input.query_text(), "tomorrow");
    }

    #[test]
    fn test_object_query_is_unwrapped() {
        let raw = RawQuery::new(json!({"query": {"text": "friday", "user_id": "abc"}}));
        let input = raw.unwrap_input();
        assert_eq!(input.text(), Some("friday"));
        assert_eq!(input.user_id().as_deref(), Some("abc"));
    }

    #[test]
    fn test_flat_payload_is_used_as_is() {
        let raw = RawQuery::new(json!({"text": "today", "operation": "get_events"}));
        let input = raw.unwrap_input();
        assert_eq!(input.text(), Some("today"));
        assert_eq!(input.operation(), Some("get_events"));
    }

    #[test]
    fn test_siblings_fill_missing_keys() {
        let raw = RawQuery::new(json!({"query": "show trash", "user_id": "u-1"}));
        let input = raw.unwrap_input();
        assert_eq!(input.text(), Some("show trash"));
        assert_eq!(input.user_id().as_deref(), Some("u-1"));
    }

    #[test]
    fn test_inner_object_wins_over_siblings() {
        let raw = RawQuery::new(json!({"query": {"user_id": "inner"}, "user_id": "outer"}));
        assert_eq!(raw.unwrap_input().user_id().as_deref(), Some("inner"));
    }

    #[test]
    fn test_empty_string_query_falls_back_to_payload() {
        let raw = RawQuery::new(json!({"query": "", "text": "yesterday"}));
        let input = raw.unwrap_input();
        assert_eq!(input.text(), Some("yesterday"));
    }

    #[test]
    fn test_query_text_serializes_when_no_text() {
        let raw = RawQuery::new(json!({"when": "tomorrow", "n": 3}));
        let input = raw.unwrap_input();
        assert_eq!(input.intent_text(), "");
        assert_eq!(input.query_text(), r#"{"when":"tomorrow","n":3}"#);
    }

    #[test]
    fn test_non_object_payload_is_empty() {
        let input = RawQuery::new(json!(["today"])).unwrap_input();
        assert_eq!(input, WorkingInput::default());
        assert_eq!(input.query_text(), "{}");
    }

    #[test]
    fn test_numeric_user_id() {
        let input = RawQuery::new(json!({"user_id": 42})).unwrap_input();
        assert_eq!(input.user_id().as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        let err = RawQuery::parse("{not json").unwrap_err().to_string();
        assert!(err.contains("Invalid input"), "got: {err}");
    }
}
