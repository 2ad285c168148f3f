use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried after RFC 3339 / RFC 2822, before date-only layouts.
const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Offset-carrying layouts (Twitter API exports and `+0700` style suffixes).
const DATE_TIME_TZ_FORMATS: [&str; 3] = [
    "%a %b %d %H:%M:%S %z %Y",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Date-only layouts. Month-first slashes are tried before day-first ones.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Parse a calendar date from a free-form date or date-time cell.
///
/// Time-of-day is discarded; offset-carrying values keep the date as written
/// (no conversion to UTC). `_` separators are accepted in place of `-`.
/// Returns `None` for blank or unrecognized values.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.date_naive());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc2822(value) {
        return Some(date_time.date_naive());
    }
    for format in DATE_TIME_TZ_FORMATS {
        if let Ok(date_time) = DateTime::parse_from_str(value, format) {
            return Some(date_time.date_naive());
        }
    }

    let normalized = value.replace('_', "-");
    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(date_time.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn parses_iso_dates_and_date_times() {
        assert_eq!(parse_lenient_date("2024-01-05"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date(" 2024-01-05 "), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("2024_01_05"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("2024-01-05 23:59:59"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("2024-01-05 08:12"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("2024-01-05T08:12:00.123"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("2024/01/05"), ymd(2024, 1, 5));
    }

    #[test]
    fn keeps_local_date_for_offset_values() {
        assert_eq!(
            parse_lenient_date("2024-01-05T23:30:00+07:00"),
            ymd(2024, 1, 5)
        );
        assert_eq!(
            parse_lenient_date("2024-01-05 23:30:00 +0700"),
            ymd(2024, 1, 5)
        );
        assert_eq!(
            parse_lenient_date("Fri Jan 05 23:30:00 +0000 2024"),
            ymd(2024, 1, 5)
        );
        assert_eq!(
            parse_lenient_date("Fri, 05 Jan 2024 23:30:00 +0700"),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn slash_dates_prefer_month_first() {
        assert_eq!(parse_lenient_date("02/03/2024"), ymd(2024, 2, 3));
        assert_eq!(parse_lenient_date("25/02/2024"), ymd(2024, 2, 25));
        assert_eq!(parse_lenient_date("25/02/2024 10:00"), ymd(2024, 2, 25));
        assert_eq!(parse_lenient_date("05.01.2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn parses_month_names() {
        assert_eq!(parse_lenient_date("Jan 05, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("January 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_lenient_date("5 January 2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn rejects_blank_and_invalid_values() {
        assert_eq!(parse_lenient_date(""), None);
        assert_eq!(parse_lenient_date("   "), None);
        assert_eq!(parse_lenient_date("yesterday"), None);
        assert_eq!(parse_lenient_date("2024-13-01"), None);
        assert_eq!(parse_lenient_date("2024-02-30"), None);
        assert_eq!(parse_lenient_date("31/31/2024"), None);
    }
}
