//! Date parsing and age arithmetic for `calculateAge`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 date or date-time string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and offset-less `YYYY-MM-DDTHH:MM[:SS[.fff]]`.
/// Values without an offset are interpreted as UTC.
pub fn parse_date_like(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Whole years between `born` and `now`, counted as UTC year boundaries of the elapsed span.
///
/// The elapsed duration is laid onto the Unix epoch and its calendar year is compared with
/// 1970. Dates in the future yield the absolute distance. This is not day-accurate around
/// birthdays once leap days accumulate.
pub fn age_in_years(born: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let elapsed = now.signed_duration_since(born).num_milliseconds();
    let shifted = DateTime::<Utc>::from_timestamp_millis(elapsed)?;
    Some((shifted.year() - 1970).unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(parse_date_like("2000-01-01"), Some(utc(2000, 1, 1)));
        assert_eq!(
            parse_date_like("2000-01-01T12:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2000, 1, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date_like("2000-01-01T12:30"),
            Some(Utc.with_ymd_and_hms(2000, 1, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_date_like("not-a-date"), None);
        assert_eq!(parse_date_like(""), None);
        assert_eq!(parse_date_like("2000-13-01"), None);
    }

    #[test]
    fn age_counts_elapsed_years() {
        assert_eq!(age_in_years(utc(2000, 1, 1), utc(2026, 10, 16)), Some(26));
        assert_eq!(age_in_years(utc(2000, 6, 15), utc(2000, 6, 20)), Some(0));
        assert_eq!(age_in_years(utc(2030, 1, 1), utc(2026, 1, 1)), Some(4));
    }
}
