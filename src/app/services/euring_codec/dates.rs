//! Date and time sub-encoding
//!
//! EURING exchanges dates as `DDMMYYYY` and times as `HHMM`, where unknown
//! values are rendered as hyphen placeholders of the same width. Minutes are
//! never exchanged: an encoded time always carries the `--` minute sentinel.

use crate::constants::{DATE_SENTINEL, MINUTE_SENTINEL, TIME_SENTINEL};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Encode a date as `DDMMYYYY`, or the all-hyphen placeholder when absent
pub fn date_to_euring_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%d%m%Y").to_string(),
        None => DATE_SENTINEL.to_string(),
    }
}

/// Encode a time as `HH--`, or the all-hyphen placeholder when absent
pub fn time_to_euring_time(time: Option<NaiveTime>) -> String {
    match time {
        Some(time) => format!("{:02}{}", time.hour(), MINUTE_SENTINEL),
        None => TIME_SENTINEL.to_string(),
    }
}

/// Decode an EURING date/time pair into a calendar moment.
///
/// A missing or sentinel day yields `None`. A sentinel time decodes as
/// midnight of the decoded day.
pub fn euring_to_date(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let date = euring_to_naive_date(date_str)?;
    let time = euring_to_naive_time(time_str)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is a valid time"));
    Some(date.and_time(time))
}

/// Decode the date half of the pair.
///
/// Legacy imports use `-` for unknown digits; a fully-unknown day means the
/// date itself is unknown, while any other hyphen is read as zero before
/// parsing.
// TODO: confirm with the scheme whether a partially hyphenated date should be
// rejected as unknown instead of zero-filled.
pub fn euring_to_naive_date(s: &str) -> Option<NaiveDate> {
    if !s.is_ascii() || s.len() != 8 {
        return None;
    }

    let day_part = &s[..2];
    if day_part.chars().all(|c| c == '-') {
        return None;
    }

    let day = parse_hyphen_tolerant(day_part)?;
    let month = parse_hyphen_tolerant(&s[2..4])?;
    let year = parse_hyphen_tolerant(&s[4..8])?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Decode the time half of the pair. Minutes are always the sentinel on the
/// wire but digit minutes are tolerated.
pub fn euring_to_naive_time(s: &str) -> Option<NaiveTime> {
    if !s.is_ascii() || s.len() != 4 {
        return None;
    }

    let hour_part = &s[..2];
    if hour_part.chars().all(|c| c == '-') {
        return None;
    }

    let hour = parse_hyphen_tolerant(hour_part)?;
    let minute = parse_hyphen_tolerant(&s[2..4])?;

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_hyphen_tolerant(field: &str) -> Option<u32> {
    field.replace('-', "0").parse::<u32>().ok()
}
