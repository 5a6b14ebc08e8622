//! Normalizer configuration.
//!
//! The fallback user identifier and the civil-time offset are injected here
//! rather than hard-coded in the resolution logic. A config can be built in
//! code, taken from [`NormalizerConfig::default`], or loaded from a JSON file
//! where every field is optional.

use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{NormalizerError, Result};

/// User identifier attached to deletions requests that carry none.
pub const DEFAULT_USER_ID: Uuid = Uuid::from_u128(0x50850e59_bea0_4076_83e0_85d5c7004004);

/// Civil-time offset every relative date is anchored to (Pacific Standard Time).
pub const DEFAULT_UTC_OFFSET: &str = "-08:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Reported as `user_id` when a deletions request omits one.
    pub default_user_id: Uuid,
    /// Fixed offset in `±HH:MM` form. Never adjusted for daylight saving.
    pub utc_offset: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_user_id: DEFAULT_USER_ID,
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::InvalidConfig`] if the file cannot be read
    /// or is not a valid config object.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            NormalizerError::InvalidConfig(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&contents)
            .map_err(|e| NormalizerError::InvalidConfig(format!("'{}': {}", path.display(), e)))
    }

    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NormalizerError::InvalidConfig(e.to_string()))
    }

    /// The configured offset as a `chrono` fixed offset.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::InvalidOffset`] if `utc_offset` is malformed.
    pub fn offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }
}

/// Parse a `±HH:MM` offset string (also accepts `Z` and `±HHMM`).
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| NormalizerError::InvalidOffset(format!("'{s}'")));
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => {
            return Err(NormalizerError::InvalidOffset(format!(
                "offset must start with '+' or '-': '{s}'"
            )));
        }
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => return Err(NormalizerError::InvalidOffset(format!("'{s}'"))),
    };

    if hours.len() != 2 || minutes.len() != 2 {
        return Err(NormalizerError::InvalidOffset(format!("'{s}'")));
    }
    let hours: i32 = hours
        .parse()
        .map_err(|_| NormalizerError::InvalidOffset(format!("invalid hours in '{s}'")))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| NormalizerError::InvalidOffset(format!("invalid minutes in '{s}'")))?;
    if minutes >= 60 {
        return Err(NormalizerError::InvalidOffset(format!(
            "minutes out of range in '{s}'"
        )));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| NormalizerError::InvalidOffset(format!("out of range: '{s}'")))
}
