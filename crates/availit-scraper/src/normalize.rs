//! Normalization from per-source field names to
//! [`availit_core::CanonicalHospitalAvailability`].
//!
//! Sources disagree on what to call things (`bedsAvailable`, `available_beds`,
//! ...). Each canonical field has an ordered list of accepted spellings; the
//! first one present with a usable value wins, otherwise the field takes its
//! type's empty default. Source keys that are not canonical names are carried
//! through untouched.

use availit_core::{CanonicalHospitalAvailability, RawHospitalRecord};
use serde_json::{Map, Value};

const HOSPITAL_NAME_KEYS: &[&str] = &["hospitalName", "name"];
const ADDRESS_KEYS: &[&str] = &["address", "location"];
const AVAILABLE_BEDS_KEYS: &[&str] = &["availableBeds", "bedsAvailable", "available_beds"];
const TOTAL_BEDS_KEYS: &[&str] = &["totalBeds", "bedsTotal", "total_beds"];
const ICU_BEDS_KEYS: &[&str] = &["icuBeds", "icu", "icu_beds"];
const VENTILATORS_KEYS: &[&str] = &["ventilators", "ventilator", "ventilators_available"];
const OXYGEN_KEYS: &[&str] = &["oxygenAvailable", "oxygen", "oxygen_available"];
const CONTACT_NUMBER_KEYS: &[&str] = &["contactNumber", "phone", "contact"];

/// Maps a raw source record onto the canonical schema.
///
/// Pure and total: every canonical field is always populated, and `raw` is
/// only read.
#[must_use]
pub fn normalize(raw: &Map<String, Value>) -> CanonicalHospitalAvailability {
    let extra = raw
        .iter()
        .filter(|(key, _)| !CanonicalHospitalAvailability::KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    CanonicalHospitalAvailability {
        hospital_name: first_of(raw, HOSPITAL_NAME_KEYS, as_text).unwrap_or_default(),
        address: first_of(raw, ADDRESS_KEYS, as_text).unwrap_or_default(),
        available_beds: first_of(raw, AVAILABLE_BEDS_KEYS, as_count).unwrap_or(0),
        total_beds: first_of(raw, TOTAL_BEDS_KEYS, as_count).unwrap_or(0),
        icu_beds: first_of(raw, ICU_BEDS_KEYS, as_count).unwrap_or(0),
        ventilators: first_of(raw, VENTILATORS_KEYS, as_count).unwrap_or(0),
        oxygen_available: first_of(raw, OXYGEN_KEYS, as_flag).unwrap_or(false),
        contact_number: first_of(raw, CONTACT_NUMBER_KEYS, as_text).unwrap_or_default(),
        extra,
    }
}

/// Normalizes a scraped record via its served JSON shape.
#[must_use]
pub fn normalize_record(record: &RawHospitalRecord) -> CanonicalHospitalAvailability {
    normalize(&record.to_fields())
}

fn first_of<T>(
    raw: &Map<String, Value>,
    keys: &[&str],
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(convert))
}

/// Strings (non-blank) and numbers are text; anything else is absent.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative integers, either as JSON numbers or numeric strings such as
/// the report's `"12"`. Fractional numbers are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok();
            }
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f.trunc() as u32)
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "available" => Some(true),
            "false" | "no" | "n" | "0" | "unavailable" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
