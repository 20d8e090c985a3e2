//! Frontmatter date parsing and day arithmetic.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a frontmatter date.
///
/// Accepted forms:
/// - `YYYY-MM-DD` (midnight UTC)
/// - `YYYY-MM-DDTHH:MM:SS` (UTC)
/// - RFC 3339 with offset, e.g. `2024-01-15T10:30:00+02:00`
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt.and_utc());
    }

    bail!("invalid date `{s}`, expected YYYY-MM-DD or RFC 3339")
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// Format as `January 5, 2024`.
pub fn long_date(dt: DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date("2024-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_date("2024-01-15T10:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let dt = parse_date("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);

        let dt = parse_date("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_date("  2024-02-29 ").is_ok());
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_days_between() {
        let start = parse_date("2024-01-01").unwrap();
        let end = parse_date("2024-03-01").unwrap();
        assert_eq!(days_between(start, end), 60);
        assert_eq!(days_between(end, start), -60);
    }

    #[test]
    fn test_long_date() {
        let dt = parse_date("2024-01-05").unwrap();
        assert_eq!(long_date(dt), "January 5, 2024");
    }
}
