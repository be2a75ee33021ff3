use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single vital sign reading. Type and value are free text
/// ("blood pressure", "120/80").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSignRecord {
    pub id: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "super::nullable_text::deserialize"
    )]
    pub vital_type: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub value: String,
    #[serde(with = "super::minute_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub notes: String,
}
