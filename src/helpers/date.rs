//! Date helper functions

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use chrono::{Datelike, Timelike};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Format used when the site configuration does not override it
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

lazy_static! {
    static ref DATE_TOKEN: Regex = Regex::new("YYYY|MM|DD|HH|mm|ss").unwrap();
}

/// Any value that can be coerced into a local date-time
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput<'a> {
    DateTime(DateTime<Local>),
    Naive(NaiveDateTime),
    Date(NaiveDate),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    Text(std::borrow::Cow<'a, str>),
}

impl From<DateTime<Local>> for DateInput<'_> {
    fn from(value: DateTime<Local>) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::DateTime(value.with_timezone(&Local))
    }
}

impl From<DateTime<FixedOffset>> for DateInput<'_> {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::DateTime(value.with_timezone(&Local))
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Naive(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        DateInput::Millis(value)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value.into())
    }
}

impl From<String> for DateInput<'_> {
    fn from(value: String) -> Self {
        DateInput::Text(value.into())
    }
}

impl DateInput<'_> {
    /// Coerce into a local date-time, `None` when the value is not a valid date
    pub fn coerce(&self) -> Option<DateTime<Local>> {
        match self {
            DateInput::DateTime(dt) => Some(*dt),
            DateInput::Naive(dt) => local_from_naive(dt),
            DateInput::Date(d) => local_from_naive(&d.and_hms_opt(0, 0, 0)?),
            DateInput::Millis(ms) => match Local.timestamp_millis_opt(*ms) {
                LocalResult::Single(dt) => Some(dt),
                _ => None,
            },
            DateInput::Text(s) => parse_date_string(s),
        }
    }
}

/// Format a date by substituting `YYYY MM DD HH mm ss` tokens
///
/// With no date, or a blank string, the current instant is used. A value
/// that does not coerce to a valid date formats as an empty string.
///
/// # Examples
/// ```ignore
/// format_date(Some("2024-01-05".into()), "YYYY/MM/DD") // -> "2024/01/05"
/// ```
pub fn format_date(date: Option<DateInput<'_>>, format: &str) -> String {
    let date = match date {
        None => Some(Local::now()),
        Some(DateInput::Text(s)) if s.trim().is_empty() => Some(Local::now()),
        Some(input) => input.coerce(),
    };

    let Some(date) = date else {
        return String::new();
    };

    DATE_TOKEN
        .replace_all(format, |caps: &Captures| match &caps[0] {
            "YYYY" => format!("{:04}", date.year()),
            "MM" => format!("{:02}", date.month()),
            "DD" => format!("{:02}", date.day()),
            "HH" => format!("{:02}", date.hour()),
            "mm" => format!("{:02}", date.minute()),
            "ss" => format!("{:02}", date.second()),
            other => other.to_string(),
        })
        .into_owned()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Offset-carrying values first so the offset is honoured
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(&dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return local_from_naive(&d.and_hms_opt(0, 0, 0)?);
        }
    }

    // A bare integer is milliseconds since the epoch
    if let Ok(ms) = s.parse::<i64>() {
        return DateInput::Millis(ms).coerce();
    }

    None
}

/// Interpret a wall-clock time in the local timezone
fn local_from_naive(dt: &NaiveDateTime) -> Option<DateTime<Local>> {
    resolve_wall_clock(&Local, dt)
}

/// Ambiguous times (DST fold) resolve to the earlier instant. Times skipped
/// by a DST gap move forward by an hour, landing after the gap.
fn resolve_wall_clock<Tz: TimeZone>(tz: &Tz, dt: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(dt) {
        LocalResult::None => {
            let shifted = dt.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        }
        resolved => resolved.earliest(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(Some(date.into()), "YYYY/MM/DD"), "2024/01/05");
        assert_eq!(format_date(Some(date.into()), "YYYY-MM-DD"), "2024-01-05");
    }

    #[test]
    fn test_format_time_tokens() {
        let date = Local.with_ymd_and_hms(2024, 1, 5, 9, 3, 7).unwrap();
        assert_eq!(format_date(Some(date.into()), "HH:mm:ss"), "09:03:07");
        assert_eq!(
            format_date(Some(date.into()), "YYYY-MM-DD HH:mm:ss"),
            "2024-01-05 09:03:07"
        );
    }

    #[test]
    fn test_format_now_when_absent() {
        let out = format_date(None, "YYYY-MM-DD");
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
        assert!(re.is_match(&out), "unexpected output: {out}");

        let today = Local::now().format("%Y-%m-%d").to_string();
        let yesterday = (Local::now() - chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(out == today || out == yesterday);
    }

    #[test]
    fn test_invalid_date_is_empty() {
        assert_eq!(format_date(Some("not-a-date".into()), "YYYY-MM-DD"), "");
        assert_eq!(format_date(Some("2024-13-45".into()), "YYYY-MM-DD"), "");
    }

    #[test]
    fn test_blank_string_formats_now() {
        for blank in ["", "   "] {
            let out = format_date(Some(blank.into()), "YYYY-MM-DD");
            let today = Local::now().format("%Y-%m-%d").to_string();
            let yesterday = (Local::now() - chrono::Duration::days(1))
                .format("%Y-%m-%d")
                .to_string();
            assert!(out == today || out == yesterday, "unexpected output: {out}");
        }
    }

    /// UTC-5, switching to UTC-4 at 02:00 local on 2024-03-10
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap()
        }

        fn before() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch();
            if *local < switch {
                LocalResult::Single(Self::before())
            } else if *local < switch + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            // 02:00 at UTC-5 is 07:00 UTC
            if *utc < Self::switch() + Duration::hours(5) {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn test_time_in_dst_gap_moves_forward() {
        let gap = NaiveDateTime::parse_from_str("2024-03-10 02:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let dt = resolve_wall_clock(&SpringForward, &gap).unwrap();
        assert_eq!(dt.naive_local().to_string(), "2024-03-10 03:30:00");
        assert_eq!(dt.naive_utc().to_string(), "2024-03-10 07:30:00");

        let before = NaiveDateTime::parse_from_str("2024-03-10 01:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let dt = resolve_wall_clock(&SpringForward, &before).unwrap();
        assert_eq!(dt.naive_utc().to_string(), "2024-03-10 06:30:00");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let date = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            format_date(Some(date.into()), "Day DD of MMMM, YY [Q]"),
            "Day 09 of 0303, YY [Q]"
        );
        assert_eq!(format_date(Some(date.into()), "no tokens"), "no tokens");
    }

    #[test]
    fn test_tokens_replaced_in_single_pass() {
        // A substituted value must not be rescanned for tokens
        let date = Local.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_date(Some(date.into()), "MMDD"), "1231");
        assert_eq!(format_date(Some(date.into()), "YYYYY"), "2024Y");
    }

    #[test]
    fn test_coerce_strings() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date_string("2024/01/15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");

        let dt = parse_date_string("Jan 15, 2024").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");

        let dt = parse_date_string("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.with_timezone(&Utc).format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn test_coerce_millis() {
        let dt = DateInput::Millis(0).coerce().unwrap();
        assert_eq!(dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(), "1970-01-01");
        assert!(parse_date_string("86400000").is_some());
    }

    #[test]
    fn test_date_xml() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 9, 3, 7).unwrap();
        assert_eq!(date_xml(&date), "2024-01-05T09:03:07.000+00:00");
    }
}
