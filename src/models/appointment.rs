use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted appointment date format.
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub doctor: String,
    pub date: NaiveDate,
    /// Free-form, as entered ("10:30", "after lunch").
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub time: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub location: String,
    #[serde(default, deserialize_with = "super::nullable_text::deserialize")]
    pub notes: String,
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_appointment_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), APPOINTMENT_DATE_FORMAT).ok()
}
