use std::collections::HashMap;

use serde::{
    de::Deserializer, ser::SerializeMap, Deserialize, Serialize, Serializer,
};

/// Placed in a [`VehicleRecord`] for every field the source page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// The fields extracted for each vehicle, in the order they are reported.
pub const FIELDS: [&str; 22] = [
    "Owner Name",
    "Father's Name",
    "Owner Serial No",
    "Model Name",
    "Maker Model",
    "Vehicle Class",
    "Fuel Type",
    "Fuel Norms",
    "Registration Date",
    "Insurance Company",
    "Insurance No",
    "Insurance Expiry",
    "Insurance Upto",
    "Fitness Upto",
    "Tax Upto",
    "PUC No",
    "PUC Upto",
    "Financier Name",
    "Registered RTO",
    "Address",
    "City Name",
    "Phone",
];

/// Example registration number used in usage hints.
pub const EXAMPLE_REGISTRATION: &str = "UP32XX1234";

/// Details of a single vehicle keyed by the names in [`FIELDS`].
///
/// Every field is always present. Fields that could not be found hold
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    values: Vec<String>,
}

impl Default for VehicleRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleRecord {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: vec![NOT_AVAILABLE.to_string(); FIELDS.len()],
        }
    }

    fn position(field: &str) -> Option<usize> {
        FIELDS.iter().position(|f| *f == field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        Self::position(field).map(|i| self.values[i].as_str())
    }

    /// Stores `value` trimmed, or the sentinel if nothing is left after trimming.
    /// Returns `false` if `field` is not one of [`FIELDS`].
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let Some(index) = Self::position(field) else {
            return false;
        };
        let value = value.trim();
        self.values[index] = if value.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value.to_string()
        };
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELDS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Number of fields holding something other than the sentinel.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.values.iter().filter(|v| *v != NOT_AVAILABLE).count()
    }
}

impl Serialize for VehicleRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELDS.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VehicleRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = HashMap::<String, String>::deserialize(deserializer)?;
        let mut record = VehicleRecord::new();
        for (field, value) in &entries {
            record.set(field, value);
        }
        Ok(record)
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub usage: String,
    pub developer: String,
}

impl ServiceInfo {
    #[must_use]
    pub fn new(developer: &str) -> Self {
        Self {
            message: format!("Vehicle Search API by {developer} is Live!"),
            usage: format!("/lookup?rc={EXAMPLE_REGISTRATION}"),
            developer: developer.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSuccess {
    pub status: String,
    #[serde(flatten)]
    pub record: VehicleRecord,
    pub copyright: String,
}

impl LookupSuccess {
    #[must_use]
    pub fn new(record: VehicleRecord, copyright: &str) -> Self {
        Self {
            status: "success".to_string(),
            record,
            copyright: copyright.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupFailure {
    pub status: String,
    pub message: String,
    pub developer: String,
}

impl LookupFailure {
    #[must_use]
    pub fn new(message: &str, developer: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            developer: developer.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingParameter {
    pub error: String,
    pub developer: String,
}
