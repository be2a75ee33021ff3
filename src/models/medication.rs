use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked medication. Created on add, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub dosage: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub schedule: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub notes: String,
    pub date_added: NaiveDate, // YYYY-MM-DD
}
