//! Normalized query descriptors handed to the retrieval collaborators.

use serde::{Deserialize, Serialize};

/// Which downstream operation a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListDeletions,
    GetEvents,
}

/// The output of one normalization pass. Exactly one operation is emitted.
///
/// Serializes with the operation as an inline tag:
///
/// ```json
/// {"operation": "list_deletions", "user_id": "..."}
/// {"operation": "get_events", "start": "...", "end": "...", ...}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ResolvedQuery {
    ListDeletions { user_id: String },
    GetEvents(EventWindow),
}

impl ResolvedQuery {
    pub fn operation(&self) -> Operation {
        match self {
            ResolvedQuery::ListDeletions { .. } => Operation::ListDeletions,
            ResolvedQuery::GetEvents(_) => Operation::GetEvents,
        }
    }

    /// The event window, if this is a `get_events` query.
    pub fn window(&self) -> Option<&EventWindow> {
        match self {
            ResolvedQuery::GetEvents(window) => Some(window),
            ResolvedQuery::ListDeletions { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain strings, bools and enums: serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// A concrete event interval at the fixed offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    /// Interval start, e.g. `2024-06-12T00:00:00-08:00`.
    pub start: String,
    /// Interval end, e.g. `2024-06-14T23:59:00-08:00`.
    pub end: String,
    /// `YYYY-MM-DD` of `start`.
    pub requested_date: String,
    /// `YYYY-MM-DD` of `end` when the window is a range, otherwise null.
    pub end_date: Option<String>,
    pub is_range: bool,
    /// The free-text query the window was resolved from. Absent when the
    /// caller supplied `start`/`end` directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_deletions_shape() {
        let resolved = ResolvedQuery::ListDeletions {
            user_id: "u-1".to_string(),
        };
        assert_eq!(resolved.operation(), Operation::ListDeletions);
        assert!(resolved.window().is_none());
        assert_eq!(
            resolved.to_json(),
            json!({"operation": "list_deletions", "user_id": "u-1"})
        );
    }

    #[test]
    fn test_get_events_shape() {
        let resolved = ResolvedQuery::GetEvents(EventWindow {
            start: "2024-06-12T00:00:00-08:00".to_string(),
            end: "2024-06-12T23:59:00-08:00".to_string(),
            requested_date: "2024-06-12".to_string(),
            end_date: None,
            is_range: false,
            query: Some("today".to_string()),
        });
        assert_eq!(resolved.operation(), Operation::GetEvents);
        assert_eq!(
            resolved.to_json(),
            json!({
                "operation": "get_events",
                "start": "2024-06-12T00:00:00-08:00",
                "end": "2024-06-12T23:59:00-08:00",
                "requested_date": "2024-06-12",
                "end_date": null,
                "is_range": false,
                "query": "today"
            })
        );
    }

    #[test]
    fn test_deserialize_get_events() {
        let value = json!({
            "operation": "get_events",
            "start": "2024-01-10T00:00:00-08:00",
            "end": "2024-01-11T23:59:00-08:00",
            "requested_date": "2024-01-10",
            "end_date": "2024-01-11",
            "is_range": true
        });
        let resolved: ResolvedQuery = serde_json::from_value(value).unwrap();
        let window = resolved.window().unwrap();
        assert!(window.is_range);
        assert_eq!(window.query, None);
    }
}
