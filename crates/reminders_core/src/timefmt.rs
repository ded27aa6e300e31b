//! The one date-time format the application speaks.
//!
//! All due dates and reminder times cross the boundary as
//! `"YYYY-MM-DD HH:MM"` in local wall-clock time, minute granularity.

use crate::error::AppError;
use chrono::{Local, NaiveDateTime};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).map_err(|_| {
        AppError::invalid_time(format!("expected \"YYYY-MM-DD HH:MM\", got \"{raw}\""))
    })
}

pub fn format(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::{format, parse};

    #[test]
    fn parse_accepts_minute_granularity() {
        let parsed = parse("2026-09-01 08:45").unwrap();
        assert_eq!(format(parsed), "2026-09-01 08:45");
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let parsed = parse("  2026-09-01 08:45 ").unwrap();
        assert_eq!(format(parsed), "2026-09-01 08:45");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse("not-a-date").unwrap_err();
        assert_eq!(err.code(), "invalid_time");
    }

    #[test]
    fn parse_rejects_seconds() {
        assert!(parse("2026-09-01 08:45:00").is_err());
    }

    #[test]
    fn parse_rejects_date_only() {
        assert!(parse("2026-09-01").is_err());
    }
}
