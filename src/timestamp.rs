//! Localization of event timestamps for display.

use crate::core::HandlerError;
use chrono::{NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// The only timestamp layout the event source emits.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `YYYY-MM-DDTHH:MM:SSZ`, byte for byte; `d` marks a digit.
const EVENT_TIME_SHAPE: &[u8; 20] = b"dddd-dd-ddTdd:dd:ddZ";

/// The display zone used when none is configured.
pub const DEFAULT_DISPLAY_TIMEZONE: Tz = chrono_tz::Europe::London;

/// An event time rendered in the audience's local zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedTime {
    /// `DD-MM-YYYY`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
}

/// Parses a UTC event time and renders it in `tz`.
///
/// chrono alone is lenient about padding, whitespace, signs and leap
/// seconds, so the exact shape is checked first.
pub fn localize(raw: &str, tz: Tz) -> Result<LocalizedTime, HandlerError> {
    let invalid = || HandlerError::InvalidTimestamp {
        value: raw.to_string(),
    };
    if !has_event_time_shape(raw) {
        return Err(invalid());
    }
    let naive = NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT).map_err(|_| invalid())?;
    // Leap seconds are carried in the nanosecond field.
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    let local = Utc.from_utc_datetime(&naive).with_timezone(&tz);

    Ok(LocalizedTime {
        date: local.format("%d-%m-%Y").to_string(),
        time: local.format("%H:%M:%S").to_string(),
    })
}

fn has_event_time_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == EVENT_TIME_SHAPE.len()
        && bytes
            .iter()
            .zip(EVENT_TIME_SHAPE)
            .all(|(&b, &expected)| match expected {
                b'd' => b.is_ascii_digit(),
                _ => b == expected,
            })
}
