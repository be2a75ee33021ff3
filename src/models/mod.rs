//! Record types for everything the assistant tracks, plus the
//! on-disk `UserDataStore` document that groups them.

pub mod appointment;
pub mod medication;
pub mod note;
pub mod user_data;
pub mod vital_sign;

pub use appointment::AppointmentRecord;
pub use medication::MedicationRecord;
pub use note::NoteRecord;
pub use user_data::UserDataStore;
pub use vital_sign::VitalSignRecord;

use uuid::Uuid;

/// Length of a record identifier (leading hex characters of a v4 UUID).
pub const RECORD_ID_LEN: usize = 8;

/// Generate a short record identifier.
pub fn new_record_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(RECORD_ID_LEN);
    id
}

/// Serde adapter for minute-precision timestamps (`YYYY-MM-DD HH:MM`).
pub mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Free-text fields read `null` as an empty string. Older data files
/// store a missing form field as `null`.
pub mod nullable_text {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
