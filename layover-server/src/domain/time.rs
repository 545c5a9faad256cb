//! Timestamp parsing and duration display.
//!
//! Users type times into HTML `datetime-local` fields, which carry no
//! offset, while API clients usually send RFC 3339. Both are accepted;
//! offset-less times are read as UTC.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};

/// Formats accepted for offset-less timestamps.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: expected RFC 3339 or YYYY-MM-DDTHH:MM")]
pub struct TimestampError {
    input: String,
}

/// Parse a timestamp from RFC 3339 or a naive date-time.
///
/// # Examples
///
/// ```
/// use layover_server::domain::parse_timestamp;
///
/// let a = parse_timestamp("2024-03-15T09:00:00+08:00").unwrap();
/// let b = parse_timestamp("2024-03-15T01:00").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_timestamp("15/03/2024 09:00").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| TimestampError {
            input: input.to_string(),
        })
}

/// Elapsed time between two instants in fractional hours.
///
/// Negative when `end` precedes `start`.
pub fn elapsed_hours(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> f64 {
    end.signed_duration_since(start).num_milliseconds() as f64 / 3_600_000.0
}

/// Human-readable duration, e.g. "5h 30m" or "45m".
pub fn format_duration(duration: Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Current time as a fixed-offset timestamp.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-03-15T09:00:00+11:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 11 * 3600);
        assert_eq!(dt.to_rfc3339(), "2024-03-15T09:00:00+11:00");
    }

    #[test]
    fn parses_datetime_local_as_utc() {
        let dt = parse_timestamp("2024-03-15T09:05").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-15T09:05:00+00:00");

        let dt = parse_timestamp(" 2024-03-15 09:05:30 ").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-15T09:05:30+00:00");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(err.to_string().contains("next tuesday"));
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01T09:00").is_err());
    }

    #[test]
    fn elapsed_hours_is_signed() {
        let a = parse_timestamp("2024-03-15T09:00").unwrap();
        let b = parse_timestamp("2024-03-15T12:30").unwrap();
        assert_eq!(elapsed_hours(a, b), 3.5);
        assert_eq!(elapsed_hours(b, a), -3.5);
        assert_eq!(elapsed_hours(a, a), 0.0);
    }

    #[test]
    fn elapsed_hours_respects_offsets() {
        let dep = parse_timestamp("2024-03-15T22:00:00+00:00").unwrap();
        let arr = parse_timestamp("2024-03-16T07:00:00+08:00").unwrap();
        assert_eq!(elapsed_hours(dep, arr), 1.0);
    }

    #[test]
    fn duration_display() {
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::minutes(60)), "1h 0m");
        assert_eq!(format_duration(Duration::minutes(330)), "5h 30m");
    }
}
