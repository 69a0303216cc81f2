//! Tests for the geographic coordinate sub-encoding

use crate::app::services::euring_codec::coordinates::{decimal_to_euring, euring_to_decimal};

#[test]
fn test_encode_known_coordinates() {
    // 51°30'00"N 000°30'00"W
    assert_eq!(decimal_to_euring(51.5, -0.5), "+513000-0003000");

    // Equator / prime meridian
    assert_eq!(decimal_to_euring(0.0, 0.0), "+000000+0000000");

    // Southern and eastern hemispheres
    assert_eq!(decimal_to_euring(-33.925, 151.175), "-335530+1511030");
}

#[test]
fn test_encode_truncates_sub_second_precision() {
    // 10.9999° is 10°59'59.64"; the encoder truncates, never rounds
    assert_eq!(decimal_to_euring(10.9999, 0.0), "+105959+0000000");

    // Just under one minute stays at 59 seconds
    assert_eq!(decimal_to_euring(0.016666, 0.0), "+000059+0000000");
}

#[test]
fn test_encode_width_invariant() {
    for (lat, lon) in [(0.0, 0.0), (-90.0, -180.0), (90.0, 180.0), (5.1, -7.9)] {
        let encoded = decimal_to_euring(lat, lon);
        assert_eq!(encoded.len(), 15, "encoding of ({}, {})", lat, lon);
    }
}

#[test]
fn test_decode_known_coordinates() {
    let (lat, lon) = euring_to_decimal("+513000-0003000").unwrap();
    assert_eq!(lat, 51.5);
    assert_eq!(lon, -0.5);

    let (lat, lon) = euring_to_decimal("-335530+1511030").unwrap();
    assert_eq!(lat, -33.925);
    assert!((lon - 151.175).abs() < 1e-6);
}

#[test]
fn test_decode_rounds_to_6_decimals() {
    // 1 second of arc is a repeating decimal; decode rounds at 6 places
    let (lat, _) = euring_to_decimal("+000001+0000000").unwrap();
    assert_eq!(lat, 0.000278);
}

#[test]
fn test_decode_rejects_wrong_length() {
    assert!(euring_to_decimal("").is_err());
    assert!(euring_to_decimal("+513000").is_err());
    assert!(euring_to_decimal("+513000-00030000").is_err());
}

#[test]
fn test_decode_rejects_bad_sign() {
    assert!(euring_to_decimal("5130000-0003000").is_err());
    assert!(euring_to_decimal("+513000 0003000").is_err());
}

#[test]
fn test_decode_rejects_non_numeric_components() {
    assert!(euring_to_decimal("+51A000-0003000").is_err());
    assert!(euring_to_decimal("+513000-00030b0").is_err());
}

#[test]
fn test_round_trip_dms_exact_coordinates() {
    let latitudes = [(0, 0, 0), (12, 30, 45), (51, 28, 39), (89, 59, 59)];
    let longitudes = [(0, 0, 0), (23, 7, 5), (151, 10, 30), (179, 59, 59)];

    for &(lat_d, lat_m, lat_s) in &latitudes {
        for &(lon_d, lon_m, lon_s) in &longitudes {
            for &(lat_sign, lon_sign) in &[(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
                let lat =
                    lat_sign * (lat_d as f64 + lat_m as f64 / 60.0 + lat_s as f64 / 3600.0);
                let lon =
                    lon_sign * (lon_d as f64 + lon_m as f64 / 60.0 + lon_s as f64 / 3600.0);

                let (decoded_lat, decoded_lon) =
                    euring_to_decimal(&decimal_to_euring(lat, lon)).unwrap();

                assert!(
                    (decoded_lat - lat).abs() < 1e-6,
                    "latitude {} round-tripped as {}",
                    lat,
                    decoded_lat
                );
                assert!(
                    (decoded_lon - lon).abs() < 1e-6,
                    "longitude {} round-tripped as {}",
                    lon,
                    decoded_lon
                );
            }
        }
    }
}
