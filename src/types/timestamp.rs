//! Wall-clock timestamp parsing and formatting
//!
//! All tables use second resolution and the `YYYY-MM-DD HH:MM:SS` layout.
//! Timestamps carry no zone; calendar fields are read as-is.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Canonical timestamp layout for every persisted table
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Additional layouts accepted when reading
const ACCEPTED_FORMATS: [&str; 4] =
    [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp, truncating any fractional seconds
///
/// Date-only text is read as midnight. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|ts| ts.with_nanosecond(0))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp in the canonical layout
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Whether a calendar day is a Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Serde adapter for timestamps stored in the canonical layout
pub mod serde_timestamp {
    use super::{format_timestamp, parse_timestamp};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize in the canonical layout
    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    /// Deserialize from any accepted layout
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", raw))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_timestamp("2024-03-05 09:15:42"), Some(ts(2024, 3, 5, 9, 15, 42)));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_timestamp("2024-03-05T09:15:42"), Some(ts(2024, 3, 5, 9, 15, 42)));
        assert_eq!(parse_timestamp(" 2024-03-05 09:15:42.750 "), Some(ts(2024, 3, 5, 9, 15, 42)));
        assert_eq!(parse_timestamp("2024-03-05"), Some(ts(2024, 3, 5, 0, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("05/03/2024 09:15"), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
    }

    #[test]
    fn test_weekend_detection() {
        // 2024-01-06 is a Saturday
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_timestamp(&ts(2024, 1, 2, 3, 4, 5)), "2024-01-02 03:04:05");
    }
}
