//! Assembly and disassembly of the EURING exchange line
//!
//! One record is exchanged as 58 pipe-joined fields at positions fixed by the
//! exchange standard. This deployment populates fields 1-33 plus the place
//! name and remarks; the biometric block is emitted empty and discarded on
//! decode.

use crate::EuringRecord;
use crate::constants::{
    DIRECTION_WIDTH, DISTANCE_WIDTH, ELAPSED_TIME_WIDTH, EURING_FIELD_COUNT,
    EURING_FIELD_SEPARATOR, field_index as idx,
};

use super::coordinates::{decimal_to_euring, euring_to_decimal};
use super::dates::{date_to_euring_date, euring_to_naive_date, euring_to_naive_time, time_to_euring_time};
use super::fields::{padded_or_hyphens, to_number_or_null, to_value_or_null};

/// Encode a record as one EURING exchange line.
///
/// The output always contains exactly 58 fields (57 separators) regardless of
/// how many fields are absent.
pub fn encode(record: &EuringRecord) -> String {
    let mut fields = vec![String::new(); EURING_FIELD_COUNT];

    set_code(&mut fields, idx::RING_SCHEME, &record.ring_scheme);
    set_code(
        &mut fields,
        idx::IDENTIFICATION_METHOD,
        &record.identification_method,
    );
    set_code(&mut fields, idx::RING_NUMBER, &record.ring_number);
    set_code(
        &mut fields,
        idx::METAL_RING_VERIFICATION,
        &record.metal_ring_verification,
    );
    set_code(&mut fields, idx::METAL_RING_INFO, &record.metal_ring_info);
    set_code(&mut fields, idx::OTHER_MARKS, &record.other_marks);
    set_code(&mut fields, idx::SPECIES_MENTIONED, &record.species_mentioned);
    set_code(&mut fields, idx::SPECIES_CONCLUDED, &record.species_concluded);
    set_code(&mut fields, idx::MANIPULATED, &record.manipulated);
    set_code(&mut fields, idx::MOVED_BEFORE, &record.moved_before);
    set_code(&mut fields, idx::CATCHING_METHOD, &record.catching_method);
    set_code(&mut fields, idx::CATCHING_LURES, &record.catching_lures);
    set_code(&mut fields, idx::SEX_MENTIONED, &record.sex_mentioned);
    set_code(&mut fields, idx::SEX_CONCLUDED, &record.sex_concluded);
    set_code(&mut fields, idx::AGE_MENTIONED, &record.age_mentioned);
    set_code(&mut fields, idx::AGE_CONCLUDED, &record.age_concluded);
    set_code(&mut fields, idx::STATUS, &record.status);
    set_code(&mut fields, idx::BROOD_SIZE, &record.brood_size);
    set_code(&mut fields, idx::PULLUS_AGE, &record.pullus_age);
    set_code(
        &mut fields,
        idx::PULLUS_AGE_ACCURACY,
        &record.pullus_age_accuracy,
    );

    fields[idx::DATE] = date_to_euring_date(record.date);
    set_code(&mut fields, idx::DATE_ACCURACY, &record.date_accuracy);
    fields[idx::TIME] = time_to_euring_time(record.time);

    set_code(&mut fields, idx::PLACE_CODE, &record.place_code);

    if let (Some(lat), Some(lon)) = (record.latitude, record.longitude) {
        fields[idx::COORDINATES] = decimal_to_euring(lat, lon);
    }
    set_code(
        &mut fields,
        idx::COORDINATE_ACCURACY,
        &record.coordinate_accuracy,
    );

    set_code(&mut fields, idx::CONDITION, &record.condition);
    set_code(&mut fields, idx::CIRCUMSTANCES, &record.circumstances);
    set_code(
        &mut fields,
        idx::CIRCUMSTANCES_PRESUMED,
        &record.circumstances_presumed,
    );
    set_code(&mut fields, idx::EURING_IDENTIFIER, &record.euring_identifier);

    fields[idx::DISTANCE] = padded_or_hyphens(record.distance, DISTANCE_WIDTH);
    fields[idx::DIRECTION] = padded_or_hyphens(record.direction, DIRECTION_WIDTH);
    fields[idx::ELAPSED_TIME] = padded_or_hyphens(record.elapsed_time, ELAPSED_TIME_WIDTH);

    set_code(&mut fields, idx::PLACE_NAME, &record.place_name);
    set_code(&mut fields, idx::REMARKS, &record.remarks);

    fields.join(&EURING_FIELD_SEPARATOR.to_string())
}

/// Decode one EURING exchange line into a record.
///
/// Exactly 58 fields are expected; a shorter line silently yields `None` for
/// the missing tail fields. Decoding never fails on bad code values, since
/// code existence is checked downstream against the reference cache.
pub fn decode(line: &str) -> EuringRecord {
    let raw: Vec<&str> = line.split(EURING_FIELD_SEPARATOR).collect();
    let field = |i: usize| -> &str { raw.get(i).copied().unwrap_or("") };

    let (latitude, longitude) = match euring_to_decimal(field(idx::COORDINATES)) {
        Ok((lat, lon)) => (Some(lat), Some(lon)),
        Err(_) => (None, None),
    };

    EuringRecord {
        ring_scheme: to_value_or_null(field(idx::RING_SCHEME)),
        identification_method: to_value_or_null(field(idx::IDENTIFICATION_METHOD)),
        ring_number: to_value_or_null(field(idx::RING_NUMBER)),
        metal_ring_verification: to_value_or_null(field(idx::METAL_RING_VERIFICATION)),
        metal_ring_info: to_value_or_null(field(idx::METAL_RING_INFO)),
        other_marks: to_value_or_null(field(idx::OTHER_MARKS)),
        species_mentioned: to_value_or_null(field(idx::SPECIES_MENTIONED)),
        species_concluded: to_value_or_null(field(idx::SPECIES_CONCLUDED)),
        manipulated: to_value_or_null(field(idx::MANIPULATED)),
        moved_before: to_value_or_null(field(idx::MOVED_BEFORE)),
        catching_method: to_value_or_null(field(idx::CATCHING_METHOD)),
        catching_lures: to_value_or_null(field(idx::CATCHING_LURES)),
        sex_mentioned: to_value_or_null(field(idx::SEX_MENTIONED)),
        sex_concluded: to_value_or_null(field(idx::SEX_CONCLUDED)),
        age_mentioned: to_value_or_null(field(idx::AGE_MENTIONED)),
        age_concluded: to_value_or_null(field(idx::AGE_CONCLUDED)),
        status: to_value_or_null(field(idx::STATUS)),
        brood_size: to_value_or_null(field(idx::BROOD_SIZE)),
        pullus_age: to_value_or_null(field(idx::PULLUS_AGE)),
        pullus_age_accuracy: to_value_or_null(field(idx::PULLUS_AGE_ACCURACY)),
        date: euring_to_naive_date(field(idx::DATE)),
        date_accuracy: to_value_or_null(field(idx::DATE_ACCURACY)),
        time: euring_to_naive_time(field(idx::TIME)),
        place_code: to_value_or_null(field(idx::PLACE_CODE)),
        latitude,
        longitude,
        coordinate_accuracy: to_value_or_null(field(idx::COORDINATE_ACCURACY)),
        condition: to_value_or_null(field(idx::CONDITION)),
        circumstances: to_value_or_null(field(idx::CIRCUMSTANCES)),
        circumstances_presumed: to_value_or_null(field(idx::CIRCUMSTANCES_PRESUMED)),
        euring_identifier: to_value_or_null(field(idx::EURING_IDENTIFIER)),
        distance: to_number_or_null(field(idx::DISTANCE)),
        direction: to_number_or_null(field(idx::DIRECTION)),
        elapsed_time: to_number_or_null(field(idx::ELAPSED_TIME)),
        place_name: to_value_or_null(field(idx::PLACE_NAME)),
        remarks: to_value_or_null(field(idx::REMARKS)),
    }
}

fn set_code(fields: &mut [String], index: usize, value: &Option<String>) {
    if let Some(value) = value {
        fields[index] = value.clone();
    }
}
