//! # calendar-query
//!
//! Deterministic normalization of loose calendar queries.
//!
//! A query arrives as free text or partial JSON fields ("friday morning",
//! `{"query": {"text": "today through friday"}}`, `{"start": ..., "end": ...}`)
//! and leaves as a [`ResolvedQuery`]: either a request to list deleted items,
//! or an event window with explicit timestamps at one fixed UTC offset.
//!
//! ## Modules
//!
//! - [`normalizer`] — [`QueryNormalizer`], the resolution pipeline
//! - [`input`] — raw payloads and shape unwrapping
//! - [`rules`] — ordered date rules (ranges, weeks, single dates)
//! - [`time_of_day`] — morning/afternoon/evening/night narrowing
//! - [`anchor`] — the fixed-offset "now"
//! - [`resolved`] — output descriptors
//! - [`config`] — injected defaults (fallback user id, UTC offset)
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use calendar_query::{NormalizerConfig, QueryNormalizer, RawQuery};
//! use chrono::{TimeZone, Utc};
//!
//! let normalizer = QueryNormalizer::new(&NormalizerConfig::default()).unwrap();
//! // Wednesday, June 12 2024 at -08:00
//! let now = Utc.with_ymd_and_hms(2024, 6, 12, 18, 0, 0).unwrap();
//!
//! let resolved = normalizer.normalize_at(&RawQuery::from_text("friday morning"), now);
//! let window = resolved.window().unwrap();
//! assert_eq!(window.start, "2024-06-14T06:00:00-08:00");
//! assert_eq!(window.end, "2024-06-14T12:59:00-08:00");
//! ```

pub mod anchor;
pub mod config;
pub mod error;
pub mod input;
pub mod normalizer;
pub mod resolved;
pub mod rules;
pub mod time_of_day;

pub use anchor::Anchor;
pub use config::{NormalizerConfig, DEFAULT_USER_ID, DEFAULT_UTC_OFFSET};
pub use error::NormalizerError;
pub use input::{RawQuery, WorkingInput};
pub use normalizer::QueryNormalizer;
pub use resolved::{EventWindow, Operation, ResolvedQuery};
pub use rules::{resolve_span, DateSpan};
pub use time_of_day::{DayPart, HourWindow};
