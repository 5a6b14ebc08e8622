//! The synthetic "now" every relative date resolves against.
//!
//! The anchor is a UTC instant viewed at one fixed civil offset. The host's
//! local timezone never participates, and no daylight-saving adjustment is
//! made: `-08:00` stays `-08:00` in July.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    local: DateTime<FixedOffset>,
}

impl Anchor {
    pub fn new(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            local: instant.with_timezone(&offset),
        }
    }

    /// Anchor at the current instant, read from the system clock.
    pub fn now(offset: FixedOffset) -> Self {
        Self::new(Utc::now(), offset)
    }

    /// The anchor's calendar date at the fixed offset.
    pub fn today(&self) -> NaiveDate {
        self.local.date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.local.offset()
    }

    /// Format `date` at `hour:minute:00` with the anchor's offset,
    /// e.g. `2024-06-12T06:00:00-08:00`.
    pub fn format_boundary(&self, date: NaiveDate, hour: u32, minute: u32) -> String {
        format!(
            "{}T{hour:02}:{minute:02}:00{}",
            format_date(date),
            self.offset()
        )
    }
}

/// `YYYY-MM-DD` form of a calendar date.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
