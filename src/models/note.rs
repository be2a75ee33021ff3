use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Free-form health note. Lives in process memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "super::minute_timestamp")]
    pub timestamp: NaiveDateTime,
}
