//! Date resolution rules.
//!
//! A query's date span is found by evaluating [`DATE_RULES`] in order against
//! the lower-cased query text; the first rule that yields a span wins and
//! nothing is combined. When no rule matches, the span is the anchor's own
//! day. Matching is substring based, not tokenized, so overlapping keywords
//! are settled by rule order alone.
//!
//! # Rules (priority order)
//!
//! 1. `range_phrase`: `today through friday`, `from monday to thursday`,
//!    `tuesday-friday`. Both endpoints must resolve or the rule is skipped.
//! 2. `this_week`: Monday through Sunday of the anchor's week.
//! 3. `next_week`: the same span one week later.
//! 4. `relative_day`: `today`, `tomorrow`, `yesterday`.
//! 5. `month_day`: `january 15`, `march 3, 2025`.
//! 6. `weekday`: `friday`, `next tuesday`.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

// ── Vocabulary ──────────────────────────────────────────────────────────────

/// Weekday names, Sunday first. Order decides which name wins when a query
/// mentions several.
const WEEKDAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// `<word> through|thru|to|until|- <word>` (with optional leading "from"),
/// then a bare `<word>-<word>`.
static RANGE_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:from\s+)?([0-9a-z_]+)\s+(?:through|thru|to|until|-)\s+([0-9a-z_]+)")
            .expect("invalid range regex"),
        Regex::new(r"([0-9a-z_]+)\s*-\s*([0-9a-z_]+)").expect("invalid hyphen range regex"),
    ]
});

/// One `<month> <day>[, <year>]` pattern per month, January first.
static MONTH_DAY_PATTERNS: LazyLock<Vec<(u32, Regex)>> = LazyLock::new(|| {
    MONTHS
        .iter()
        .zip(1u32..)
        .map(|(name, number)| {
            let pattern = format!(r"{name}\s+([0-9]{{1,2}})(?:[,\s]+([0-9]{{4}}))?");
            (number, Regex::new(&pattern).expect("invalid month-day regex"))
        })
        .collect()
});

// ── Spans and rules ─────────────────────────────────────────────────────────

/// An inclusive span of calendar days.
///
/// `range` records whether a range rule produced the span. It stays set
/// when both ends land on the same day (`friday - friday`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    range: bool,
}

impl DateSpan {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
            range: false,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            range: true,
        }
    }

    pub fn is_range(&self) -> bool {
        self.range
    }
}

/// A named resolver evaluated against lower-cased query text and the
/// anchor's calendar date.
#[derive(Clone, Copy)]
pub struct DateRule {
    pub name: &'static str,
    resolve: fn(&str, NaiveDate) -> Option<DateSpan>,
}

impl DateRule {
    pub fn apply(&self, text: &str, today: NaiveDate) -> Option<DateSpan> {
        (self.resolve)(text, today)
    }
}

impl std::fmt::Debug for DateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateRule").field("name", &self.name).finish()
    }
}

pub const DATE_RULES: [DateRule; 6] = [
    DateRule {
        name: "range_phrase",
        resolve: try_range_phrase,
    },
    DateRule {
        name: "this_week",
        resolve: try_this_week,
    },
    DateRule {
        name: "next_week",
        resolve: try_next_week,
    },
    DateRule {
        name: "relative_day",
        resolve: try_relative_day,
    },
    DateRule {
        name: "month_day",
        resolve: try_month_day,
    },
    DateRule {
        name: "weekday",
        resolve: try_weekday,
    },
];

/// Name reported when no rule matched and the span fell back to today.
pub const DEFAULT_RULE: &str = "default_today";

/// Resolve `text` (already lower-cased) to a span, returning the name of the
/// rule that produced it.
pub fn resolve_span(text: &str, today: NaiveDate) -> (&'static str, DateSpan) {
    DATE_RULES
        .iter()
        .find_map(|rule| rule.apply(text, today).map(|span| (rule.name, span)))
        .unwrap_or((DEFAULT_RULE, DateSpan::single(today)))
}

// ── Rule implementations ────────────────────────────────────────────────────

/// Explicit range phrase. Only the leftmost match of each pattern is tried.
/// Endpoints are taken as written; no reordering when end precedes start.
fn try_range_phrase(text: &str, today: NaiveDate) -> Option<DateSpan> {
    RANGE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let start = resolve_endpoint(caps.get(1)?.as_str(), today)?;
        let end = resolve_endpoint(caps.get(2)?.as_str(), today)?;
        Some(DateSpan::between(start, end))
    })
}

fn try_this_week(text: &str, today: NaiveDate) -> Option<DateSpan> {
    if !text.contains("this week") {
        return None;
    }
    week_span(today, 0)
}

fn try_next_week(text: &str, today: NaiveDate) -> Option<DateSpan> {
    if !text.contains("next week") {
        return None;
    }
    week_span(today, 7)
}

fn try_relative_day(text: &str, today: NaiveDate) -> Option<DateSpan> {
    let date = if text.contains("today") {
        today
    } else if text.contains("tomorrow") {
        today.succ_opt()?
    } else if text.contains("yesterday") {
        today.pred_opt()?
    } else {
        return None;
    };
    Some(DateSpan::single(date))
}

/// Month name followed by a day number, with an optional 4-digit year.
/// Months are tried January first; the first month that matches decides.
fn try_month_day(text: &str, today: NaiveDate) -> Option<DateSpan> {
    let (month, caps) = MONTH_DAY_PATTERNS
        .iter()
        .find_map(|(month, pattern)| pattern.captures(text).map(|caps| (*month, caps)))?;

    let day: i64 = caps.get(1)?.as_str().parse().ok()?;
    let year = match caps.get(2) {
        Some(y) => y.as_str().parse().ok()?,
        None => today.year(),
    };
    calendar_date(year, month, day).map(DateSpan::single)
}

/// First weekday name in the text (Sunday first), at its next future
/// occurrence. "next" directly before the name adds one more week.
fn try_weekday(text: &str, today: NaiveDate) -> Option<DateSpan> {
    let (position, name, weekday) = WEEKDAYS
        .iter()
        .find_map(|&(name, weekday)| text.find(name).map(|pos| (pos, name, weekday)))?;

    let mut days = days_until(today.weekday(), weekday);
    if text[..position].trim_end().ends_with("next") {
        days += 7;
    }
    tracing::trace!(weekday = name, days, "weekday offset");
    shift(today, days).map(DateSpan::single)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Resolve one captured range endpoint: an exact relative day, or a word
/// containing a weekday name (plus a week if it also contains "next").
fn resolve_endpoint(word: &str, today: NaiveDate) -> Option<NaiveDate> {
    match word {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        "yesterday" => today.pred_opt(),
        _ => {
            let &(_, weekday) = WEEKDAYS.iter().find(|(name, _)| word.contains(name))?;
            let mut days = days_until(today.weekday(), weekday);
            if word.contains("next") {
                days += 7;
            }
            shift(today, days)
        }
    }
}

/// Days from `current` forward to the next `target`, always 1..=7.
fn days_until(current: Weekday, target: Weekday) -> i64 {
    let diff = target.num_days_from_sunday() as i64 - current.num_days_from_sunday() as i64;
    if diff <= 0 {
        diff + 7
    } else {
        diff
    }
}

/// Monday through Sunday of the week containing `today`, shifted by
/// `offset_days`. Weeks are indexed from Sunday, so on a Sunday this is the
/// week that starts the next day.
fn week_span(today: NaiveDate, offset_days: i64) -> Option<DateSpan> {
    let sunday_index = today.weekday().num_days_from_sunday() as i64;
    let monday = shift(today, offset_days + 1 - sunday_index)?;
    let sunday = shift(today, offset_days + 7 - sunday_index)?;
    Some(DateSpan::between(monday, sunday))
}

/// Build a date, rolling an out-of-range day into the neighbouring month
/// (`february 30` is early March, day 0 is the previous month's last day).
fn calendar_date(year: i32, month: u32, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    shift(first, day - 1)
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

// ── Tests ───────────────────────────────────────────────────────────────────
