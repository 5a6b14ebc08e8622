//! Time-of-day narrowing ("morning", "evening", ...).
//!
//! A day part only moves the hour of the interval's outer bounds: the first
//! day's start and the last day's end. Days in between are untouched.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Day parts in matching priority.
const DAY_PARTS: [(&str, DayPart); 4] = [
    ("morning", DayPart::Morning),
    ("afternoon", DayPart::Afternoon),
    ("evening", DayPart::Evening),
    ("night", DayPart::Night),
];

impl DayPart {
    /// First day part named anywhere in already lower-cased `text`.
    pub fn detect(text: &str) -> Option<DayPart> {
        DAY_PARTS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|&(_, part)| part)
    }

    pub fn window(self) -> HourWindow {
        let (start_hour, end_hour) = match self {
            DayPart::Morning => (6, 12),
            DayPart::Afternoon => (12, 17),
            DayPart::Evening => (17, 23),
            DayPart::Night => (20, 23),
        };
        HourWindow {
            start_hour,
            start_minute: 0,
            end_hour,
            end_minute: 59,
        }
    }
}

/// Wall-clock bounds applied to the resolved interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl HourWindow {
    /// 00:00 through 23:59.
    pub const FULL_DAY: HourWindow = HourWindow {
        start_hour: 0,
        start_minute: 0,
        end_hour: 23,
        end_minute: 59,
    };

    /// The window for `text`, or the full day when no day part is named.
    pub fn for_text(text: &str) -> HourWindow {
        DayPart::detect(text).map_or(Self::FULL_DAY, DayPart::window)
    }
}
