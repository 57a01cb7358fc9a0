//! ISO-8601 timestamp parsing
//!
//! The voice-assistant device schedules alerts with timestamps such as
//! `2019-04-16T18:20:25+0000`. Only the profile it actually emits is
//! accepted: a calendar date, a time with optional fractional seconds, and an
//! optional UTC offset.

use chrono::{DateTime, NaiveDateTime};

use crate::error::AlertError;

/// Date and time, `T` or space separated, then an optional fraction
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Same layouts with a trailing `Z`, `±HH:MM`, `±HHMM` or `±HH`
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Parse `input` into seconds since the Unix epoch.
///
/// Timestamps without an offset are taken as UTC. Fractional seconds are
/// truncated.
pub fn parse_timestamp(input: &str) -> Result<i64, AlertError> {
    let input = input.trim();

    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.timestamp());
    if let Some(secs) = with_offset {
        return Ok(secs);
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.and_utc().timestamp())
        .ok_or(AlertError::TimestampUnparseable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_origin() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:00Z"), Ok(0));
        assert_eq!(parse_timestamp("1970-01-01T00:00:00"), Ok(0));
    }

    #[test]
    fn test_assistant_format() {
        // Offset without a colon is what the device sends
        assert_eq!(
            parse_timestamp("2024-03-01T12:00:30+0000"),
            Ok(1_709_294_430)
        );
    }

    #[test]
    fn test_offsets() {
        let utc = parse_timestamp("2000-01-01T00:00:00Z").unwrap();
        assert_eq!(utc, 946_684_800);
        assert_eq!(parse_timestamp("2000-01-01T01:00:00+01:00"), Ok(utc));
        assert_eq!(parse_timestamp("1999-12-31T19:00:00-0500"), Ok(utc));
        assert_eq!(parse_timestamp("2000-01-01T05:30:00+05:30"), Ok(utc));
        assert_eq!(parse_timestamp("2000-01-01T02:00:00+02"), Ok(utc));
    }

    #[test]
    fn test_fraction_and_separators() {
        let base = parse_timestamp("2021-06-15T08:09:10Z").unwrap();
        assert_eq!(parse_timestamp("2021-06-15T08:09:10.999Z"), Ok(base));
        assert_eq!(parse_timestamp("2021-06-15 08:09:10"), Ok(base));
        assert_eq!(parse_timestamp("  2021-06-15T08:09:10Z \n"), Ok(base));
    }

    #[test]
    fn test_leap_day() {
        assert!(parse_timestamp("2024-02-29T00:00:00Z").is_ok());
        assert_eq!(
            parse_timestamp("2023-02-29T00:00:00Z"),
            Err(AlertError::TimestampUnparseable)
        );
        assert!(parse_timestamp("2000-02-29T00:00:00Z").is_ok());
        assert!(parse_timestamp("1900-02-29T00:00:00Z").is_err());
    }

    #[test]
    fn test_pre_epoch_is_negative() {
        assert_eq!(parse_timestamp("1969-12-31T23:59:59Z"), Ok(-1));
    }

    #[test]
    fn test_rejects_garbage() {
        for input in [
            "",
            "soon",
            "2024-03-01",
            "2024-03-01T12:00Z",
            "2024-03-01X12:00:00Z",
            "2024-13-01T12:00:00Z",
            "2024-04-31T12:00:00Z",
            "2024-03-01T24:00:00Z",
            "2024-03-01T12:60:00Z",
            "2024-03-01T12:00:00.Z",
            "2024-03-01T12:00:00+2400",
            "2024-03-01T12:00:00Z trailing",
            "2024-03-01T12:00:00+1",
        ] {
            assert_eq!(
                parse_timestamp(input),
                Err(AlertError::TimestampUnparseable),
                "{input:?}"
            );
        }
    }
}
