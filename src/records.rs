//! Record Store: medications, appointments, vital signs and notes.
//!
//! Medications, appointments and vitals are persisted: every add rewrites
//! the user data file before returning. Notes live in memory only.
//! List operations always return a (possibly empty) slice; the empty-state
//! sentences for presentation live on `RecordKind`.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;

use crate::models::appointment::parse_appointment_date;
use crate::models::{
    new_record_id, AppointmentRecord, MedicationRecord, NoteRecord, UserDataStore,
    VitalSignRecord,
};
use crate::storage::{self, StorageError};

pub const APPOINTMENT_DATE_ERROR: &str = "Please use YYYY-MM-DD format for the date.";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// User-facing validation message.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The four record kinds the assistant tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Medication,
    Appointment,
    VitalSign,
    Note,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Medication => "medication",
            RecordKind::Appointment => "appointment",
            RecordKind::VitalSign => "vital_sign",
            RecordKind::Note => "note",
        }
    }

    /// Sentence shown in place of an empty list.
    pub fn empty_text(self) -> &'static str {
        match self {
            RecordKind::Medication => "No medications currently tracked.",
            RecordKind::Appointment => "No appointments currently scheduled.",
            RecordKind::VitalSign => "No vital signs recorded yet.",
            RecordKind::Note => "No health notes recorded yet.",
        }
    }
}

/// Input for `add_medication`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMedication {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub notes: String,
}

/// Input for `add_appointment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAppointment {
    #[serde(default)]
    pub doctor: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// Input for `add_vital`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVital {
    #[serde(default, rename = "type")]
    pub vital_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub notes: String,
}

/// Input for `add_note`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// In-memory record collections backed by the per-user JSON file.
pub struct RecordStore {
    path: PathBuf,
    data: UserDataStore,
    notes: Vec<NoteRecord>,
}

impl RecordStore {
    /// Load the store from `path` (empty if missing or corrupt).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = storage::load_user_data(&path);
        Self {
            path,
            data,
            notes: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_medication(&mut self, input: NewMedication) -> Result<String, RecordError> {
        if is_blank(&input.name) || is_blank(&input.dosage) || is_blank(&input.schedule) {
            return Err(RecordError::Validation(
                "Name, dosage, and schedule are required".into(),
            ));
        }

        let record = MedicationRecord {
            id: new_record_id(),
            name: input.name.trim().to_string(),
            dosage: input.dosage.trim().to_string(),
            schedule: input.schedule.trim().to_string(),
            notes: input.notes,
            date_added: Local::now().date_naive(),
        };
        let message = format!("Successfully added medication: {}", record.name);
        let id = record.id.clone();

        self.data.medications.push(record);
        if let Err(e) = self.save() {
            self.data.medications.pop();
            return Err(e);
        }
        tracing::info!(kind = RecordKind::Medication.as_str(), %id, "Record added");
        Ok(message)
    }

    pub fn add_appointment(&mut self, input: NewAppointment) -> Result<String, RecordError> {
        let date = parse_appointment_date(&input.date)
            .ok_or_else(|| RecordError::Validation(APPOINTMENT_DATE_ERROR.into()))?;

        let record = AppointmentRecord {
            id: new_record_id(),
            doctor: input.doctor.trim().to_string(),
            date,
            time: input.time.trim().to_string(),
            location: input.location.trim().to_string(),
            notes: input.notes,
        };
        let message = format!(
            "Appointment scheduled with {} on {} at {}, {}",
            record.doctor,
            record.date.format("%Y-%m-%d"),
            record.time,
            record.location
        );
        let id = record.id.clone();

        self.data.appointments.push(record);
        if let Err(e) = self.save() {
            self.data.appointments.pop();
            return Err(e);
        }
        tracing::info!(kind = RecordKind::Appointment.as_str(), %id, "Record added");
        Ok(message)
    }

    pub fn add_vital(&mut self, input: NewVital) -> Result<String, RecordError> {
        if is_blank(&input.vital_type) || is_blank(&input.value) {
            return Err(RecordError::Validation("Type and value are required".into()));
        }

        let record = VitalSignRecord {
            id: new_record_id(),
            vital_type: input.vital_type.trim().to_string(),
            value: input.value.trim().to_string(),
            timestamp: Local::now().naive_local(),
            notes: input.notes,
        };
        let message = format!("Successfully recorded {}: {}", record.vital_type, record.value);
        let id = record.id.clone();

        self.data.vital_signs.push(record);
        if let Err(e) = self.save() {
            self.data.vital_signs.pop();
            return Err(e);
        }
        tracing::info!(kind = RecordKind::VitalSign.as_str(), %id, "Record added");
        Ok(message)
    }

    /// Notes are kept in memory only; nothing is written to disk. Any
    /// note is accepted, including one with an empty title and content.
    pub fn add_note(&mut self, input: NewNote) -> Result<String, RecordError> {
        let record = NoteRecord {
            id: new_record_id(),
            title: input.title.trim().to_string(),
            content: input.content,
            timestamp: Local::now().naive_local(),
        };
        tracing::info!(kind = RecordKind::Note.as_str(), id = %record.id, "Record added");
        self.notes.push(record);
        Ok("Note added successfully".into())
    }

    pub fn list_medications(&self) -> &[MedicationRecord] {
        &self.data.medications
    }

    pub fn list_appointments(&self) -> &[AppointmentRecord] {
        &self.data.appointments
    }

    pub fn list_vitals(&self) -> &[VitalSignRecord] {
        &self.data.vital_signs
    }

    pub fn list_notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn data(&self) -> &UserDataStore {
        &self.data
    }

    /// Owned copy of the persisted collections.
    pub fn snapshot(&self) -> UserDataStore {
        self.data.clone()
    }

    fn save(&self) -> Result<(), RecordError> {
        storage::save_user_data(&self.path, &self.data).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save user data");
            RecordError::from(e)
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
