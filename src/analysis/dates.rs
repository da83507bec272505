//! Due-date normalization
//!
//! Completions write dates however the model feels like. This module
//! accepts the common shapes and emits a UTC timestamp with millisecond
//! precision, e.g. `2025-03-15T00:00:00.000Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

use super::is_not_applicable;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable date '{0}'")]
pub struct UnparseableDate(pub String);

/// Normalize a due-date value to an ISO-8601 UTC timestamp
///
/// # Returns
/// * `Ok(None)` for an empty value or "N/A" (any case)
/// * `Ok(Some(timestamp))` for a recognized date or date-time
/// * `Err(UnparseableDate)` for anything else
///
/// Date-only values are taken as midnight UTC.
pub fn normalize_due_date(raw: &str) -> Result<Option<String>, UnparseableDate> {
    let raw = raw.trim();
    if is_not_applicable(raw) {
        return Ok(None);
    }

    parse_timestamp(raw)
        .map(|ts| Some(ts.to_rfc3339_opts(SecondsFormat::Millis, true)))
        .ok_or_else(|| UnparseableDate(raw.to_string()))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_date_values() {
        assert_eq!(normalize_due_date("N/A"), Ok(None));
        assert_eq!(normalize_due_date("n/a"), Ok(None));
        assert_eq!(normalize_due_date("   "), Ok(None));
        assert_eq!(normalize_due_date(""), Ok(None));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(
            normalize_due_date("2025-03-15"),
            Ok(Some("2025-03-15T00:00:00.000Z".to_string()))
        );
    }

    #[test]
    fn test_rfc3339_with_offset_is_converted_to_utc() {
        assert_eq!(
            normalize_due_date("2025-03-15T09:30:00+02:00"),
            Ok(Some("2025-03-15T07:30:00.000Z".to_string()))
        );
    }

    #[test]
    fn test_naive_datetime() {
        assert_eq!(
            normalize_due_date("2025-03-15 18:45:00"),
            Ok(Some("2025-03-15T18:45:00.000Z".to_string()))
        );
    }

    #[test]
    fn test_written_dates() {
        let expected = Ok(Some("2025-03-05T00:00:00.000Z".to_string()));
        assert_eq!(normalize_due_date("March 5, 2025"), expected);
        assert_eq!(normalize_due_date("Mar 5, 2025"), expected);
        assert_eq!(normalize_due_date("5 March 2025"), expected);
        assert_eq!(normalize_due_date("03/05/2025"), expected);
        assert_eq!(normalize_due_date("2025/03/05"), expected);
    }

    #[test]
    fn test_unparseable_date() {
        assert_eq!(
            normalize_due_date("next Tuesday"),
            Err(UnparseableDate("next Tuesday".to_string()))
        );
        assert!(normalize_due_date("2025-02-30").is_err());
    }
}
