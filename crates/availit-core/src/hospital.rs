//! Hospital records as scraped from live sources, and the canonical shape the
//! search frontend renders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data row of a tabular bed-availability report.
///
/// Values are the trimmed cell text, in the report's column order. Nothing is
/// parsed into numbers here; consumers decide how to read the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedAvailabilityRecord {
    pub hospital_id: String,
    pub name: String,
    pub total_free_bed: String,
    pub total_free_critical_bed_no_vent: String,
    pub total_free_critical_bed_vent: String,
    pub total_free_non_critical_bed: String,
    pub available_free_critical_bed_no_vent: String,
    pub available_free_critical_bed_vent: String,
    pub available_free_non_critical_bed: String,
    pub phone: String,
    pub contact_person: String,
    pub contact_mobile: String,
    pub liaison_officer: String,
    pub last_update: String,
}

impl BedAvailabilityRecord {
    /// Number of positional columns a report row maps onto.
    pub const COLUMNS: usize = 14;

    /// Builds a record from cell texts in column order. Missing trailing
    /// cells become empty strings; cells past [`Self::COLUMNS`] are ignored.
    #[must_use]
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        Self {
            hospital_id: cell(0),
            name: cell(1),
            total_free_bed: cell(2),
            total_free_critical_bed_no_vent: cell(3),
            total_free_critical_bed_vent: cell(4),
            total_free_non_critical_bed: cell(5),
            available_free_critical_bed_no_vent: cell(6),
            available_free_critical_bed_vent: cell(7),
            available_free_non_critical_bed: cell(8),
            phone: cell(9),
            contact_person: cell(10),
            contact_mobile: cell(11),
            liaison_officer: cell(12),
            last_update: cell(13),
        }
    }
}

/// A hospital directory entry from a card-based page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Whatever shape a live source produces. Serializes as the inner record,
/// so a list of these is a plain JSON array of objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawHospitalRecord {
    BedAvailability(BedAvailabilityRecord),
    Directory(DirectoryRecord),
}

impl RawHospitalRecord {
    /// The record as a JSON key/value map, keyed exactly as it is served.
    #[must_use]
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Both variants are plain string structs and always serialize to objects.
            _ => Map::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            RawHospitalRecord::BedAvailability(r) => &r.name,
            RawHospitalRecord::Directory(r) => &r.name,
        }
    }
}

impl From<BedAvailabilityRecord> for RawHospitalRecord {
    fn from(record: BedAvailabilityRecord) -> Self {
        RawHospitalRecord::BedAvailability(record)
    }
}

impl From<DirectoryRecord> for RawHospitalRecord {
    fn from(record: DirectoryRecord) -> Self {
        RawHospitalRecord::Directory(record)
    }
}

/// The hospital-availability schema the search frontend renders.
///
/// `extra` carries every source field that is not one of the canonical keys,
/// so nothing scraped is lost on the way through normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHospitalAvailability {
    pub hospital_name: String,
    pub address: String,
    pub available_beds: u32,
    pub total_beds: u32,
    pub icu_beds: u32,
    pub ventilators: u32,
    pub oxygen_available: bool,
    pub contact_number: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalHospitalAvailability {
    /// Wire names of the canonical fields, in schema order.
    pub const KEYS: [&'static str; 8] = [
        "hospitalName",
        "address",
        "availableBeds",
        "totalBeds",
        "icuBeds",
        "ventilators",
        "oxygenAvailable",
        "contactNumber",
    ];
}
