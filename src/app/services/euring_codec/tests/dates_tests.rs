//! Tests for the date and time sub-encoding

use chrono::{NaiveDate, NaiveTime};

use crate::app::services::euring_codec::dates::{
    date_to_euring_date, euring_to_date, euring_to_naive_date, euring_to_naive_time,
    time_to_euring_time,
};

#[test]
fn test_encode_known_date() {
    let date = NaiveDate::from_ymd_opt(2019, 8, 5);
    assert_eq!(date_to_euring_date(date), "05082019");

    let date = NaiveDate::from_ymd_opt(1987, 12, 31);
    assert_eq!(date_to_euring_date(date), "31121987");
}

#[test]
fn test_encode_absent_date_as_sentinel() {
    assert_eq!(date_to_euring_date(None), "--------");
}

#[test]
fn test_encode_time_never_carries_minutes() {
    let time = NaiveTime::from_hms_opt(14, 30, 0);
    assert_eq!(time_to_euring_time(time), "14--");

    let time = NaiveTime::from_hms_opt(6, 0, 0);
    assert_eq!(time_to_euring_time(time), "06--");
}

#[test]
fn test_encode_absent_time_as_sentinel() {
    assert_eq!(time_to_euring_time(None), "----");
}

#[test]
fn test_decode_known_pair() {
    let moment = euring_to_date("05082019", "14--").unwrap();
    assert_eq!(
        moment,
        NaiveDate::from_ymd_opt(2019, 8, 5)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_decode_sentinel_pair_is_none() {
    assert!(euring_to_date("--------", "----").is_none());
}

#[test]
fn test_decode_sentinel_day_is_none() {
    assert!(euring_to_date("--082019", "14--").is_none());
}

#[test]
fn test_decode_sentinel_time_defaults_to_midnight() {
    let moment = euring_to_date("05082019", "----").unwrap();
    assert_eq!(
        moment,
        NaiveDate::from_ymd_opt(2019, 8, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_decode_hyphen_digits_read_as_zero() {
    // "1-" in the day reads as day 10 (legacy tolerance)
    let date = euring_to_naive_date("1-052019").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2019, 5, 10).unwrap());
}

#[test]
fn test_decode_zero_filled_month_is_invalid() {
    // A fully hyphenated month zero-fills to month 0, which no calendar has
    assert!(euring_to_naive_date("05--2019").is_none());
}

#[test]
fn test_decode_wrong_width_is_none() {
    assert!(euring_to_naive_date("").is_none());
    assert!(euring_to_naive_date("5082019").is_none());
    assert!(euring_to_naive_time("").is_none());
    assert!(euring_to_naive_time("14-").is_none());
}

#[test]
fn test_decode_time_field() {
    assert_eq!(
        euring_to_naive_time("14--"),
        NaiveTime::from_hms_opt(14, 0, 0)
    );
    // Digit minutes are tolerated even though the wire never carries them
    assert_eq!(
        euring_to_naive_time("1430"),
        NaiveTime::from_hms_opt(14, 30, 0)
    );
    assert!(euring_to_naive_time("----").is_none());
    assert!(euring_to_naive_time("99--").is_none());
}
