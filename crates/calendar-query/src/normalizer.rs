//! Query normalization: one raw payload in, one resolved query out.
//!
//! Resolution runs in a fixed order and stops at the first step that
//! decides the outcome:
//!
//! 1. **Deletions intent**: `operation: "list_deletions"`, or query text
//!    mentioning trash or deleted items. Wins over any date phrase.
//! 2. **Explicit interval**: `start` and `end` supplied by the caller are
//!    passed through verbatim.
//! 3. **Text resolution**: the date rules in [`crate::rules`], then the
//!    time-of-day window in [`crate::time_of_day`].
//!
//! Normalization never fails. Text that matches nothing resolves to the
//! anchor's own day.

use chrono::{DateTime, FixedOffset, Utc};

use crate::anchor::{format_date, Anchor};
use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::input::{RawQuery, WorkingInput};
use crate::resolved::{EventWindow, ResolvedQuery};
use crate::rules::resolve_span;
use crate::time_of_day::HourWindow;

/// Substrings that mark a request to view deleted items.
const DELETION_KEYWORDS: [&str; 4] = ["trash", "deleted", "show trash", "view deleted"];

/// Maps raw calendar queries to [`ResolvedQuery`] descriptors.
///
/// Holds only configuration; it is cheap to clone and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    default_user_id: String,
    offset: FixedOffset,
}

impl QueryNormalizer {
    /// Build a normalizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NormalizerError::InvalidOffset`] if the configured
    /// UTC offset cannot be parsed.
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        Ok(Self {
            default_user_id: config.default_user_id.to_string(),
            offset: config.offset()?,
        })
    }

    /// Normalize against the current instant.
    pub fn normalize(&self, raw: &RawQuery) -> ResolvedQuery {
        self.resolve(raw, Anchor::now(self.offset))
    }

    /// Normalize against an explicit "now". Deterministic for a given
    /// `(raw, now)` pair.
    pub fn normalize_at(&self, raw: &RawQuery, now: DateTime<Utc>) -> ResolvedQuery {
        self.resolve(raw, Anchor::new(now, self.offset))
    }

    fn resolve(&self, raw: &RawQuery, anchor: Anchor) -> ResolvedQuery {
        let input = raw.unwrap_input();

        if is_deletions_request(&input) {
            let user_id = input
                .user_id()
                .unwrap_or_else(|| self.default_user_id.clone());
            tracing::debug!(%user_id, "classified as deletions request");
            return ResolvedQuery::ListDeletions { user_id };
        }

        if let (Some(start), Some(end)) = (input.start(), input.end()) {
            tracing::debug!(start, end, "explicit interval passthrough");
            return ResolvedQuery::GetEvents(passthrough_window(start, end));
        }

        let query_text = input.query_text();
        let lower = query_text.to_lowercase();

        let (rule, span) = resolve_span(&lower, anchor.today());
        let hours = HourWindow::for_text(&lower);
        let is_range = span.is_range();

        let window = EventWindow {
            start: anchor.format_boundary(span.start, hours.start_hour, hours.start_minute),
            end: anchor.format_boundary(span.end, hours.end_hour, hours.end_minute),
            requested_date: format_date(span.start),
            end_date: is_range.then(|| format_date(span.end)),
            is_range,
            query: Some(query_text),
        };
        tracing::debug!(
            rule,
            start = %window.start,
            end = %window.end,
            is_range,
            "resolved event window"
        );
        ResolvedQuery::GetEvents(window)
    }
}

fn is_deletions_request(input: &WorkingInput) -> bool {
    if input.operation() == Some("list_deletions") {
        return true;
    }
    let text = input.intent_text().to_lowercase();
    DELETION_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Window for caller-supplied bounds. The strings are kept verbatim; the
/// calendar dates are the parts before `T`.
fn passthrough_window(start: &str, end: &str) -> EventWindow {
    let start_date = date_part(start);
    let end_date = date_part(end);
    let is_range = start_date != end_date;
    EventWindow {
        start: start.to_string(),
        end: end.to_string(),
        requested_date: start_date.to_string(),
        end_date: is_range.then(|| end_date.to_string()),
        is_range,
        query: None,
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

// ── Tests ───────────────────────────────────────────────────────────────────
