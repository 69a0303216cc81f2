//! Geographic coordinate sub-encoding
//!
//! EURING exchanges coordinates as `±DDMMSS±DDDMMSS`: a 7-character latitude
//! half and an 8-character longitude half, each a sign followed by whole
//! degrees, minutes and seconds. Sub-second precision is truncated, never
//! rounded.

use crate::constants::{COORDINATES_LEN, LATITUDE_LEN};
use crate::{Error, Result};

/// Encode decimal coordinates as the 15-character EURING string.
///
/// Inputs outside [-90, 90] / [-180, 180] are a contract violation of the
/// caller and are not handled here.
pub fn decimal_to_euring(lat: f64, lon: f64) -> String {
    format!("{}{}", encode_half(lat, 2), encode_half(lon, 3))
}

/// Decode a 15-character EURING coordinate string into decimal degrees,
/// rounded to 6 decimal places.
pub fn euring_to_decimal(s: &str) -> Result<(f64, f64)> {
    if !s.is_ascii() || s.len() != COORDINATES_LEN {
        return Err(Error::format(format!(
            "Coordinates must be exactly {} characters, got '{}'",
            COORDINATES_LEN, s
        )));
    }

    let lat = decode_half(&s[..LATITUDE_LEN], 2)?;
    let lon = decode_half(&s[LATITUDE_LEN..], 3)?;
    Ok((lat, lon))
}

fn encode_half(value: f64, degree_width: usize) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    // The tolerance absorbs binary representation noise so DMS-exact inputs
    // do not truncate one second low.
    let total_seconds = (value.abs() * 3600.0 + 1e-6) as u64;
    let degrees = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!(
        "{}{:0width$}{:02}{:02}",
        sign,
        degrees,
        minutes,
        seconds,
        width = degree_width
    )
}

fn decode_half(half: &str, degree_width: usize) -> Result<f64> {
    let sign = match half.as_bytes()[0] {
        b'+' => 1.0,
        b'-' => -1.0,
        other => {
            return Err(Error::format(format!(
                "Coordinate half '{}' must start with '+' or '-', got '{}'",
                half, other as char
            )));
        }
    };

    let degrees = parse_component(&half[1..1 + degree_width], half)?;
    let minutes = parse_component(&half[1 + degree_width..3 + degree_width], half)?;
    let seconds = parse_component(&half[3 + degree_width..], half)?;

    let decimal = degrees as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0;
    Ok(sign * round_to_6(decimal))
}

fn parse_component(digits: &str, half: &str) -> Result<u32> {
    digits.parse::<u32>().map_err(|_| {
        Error::format(format!(
            "Coordinate half '{}' contains non-numeric component '{}'",
            half, digits
        ))
    })
}

fn round_to_6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
