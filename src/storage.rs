//! Per-user JSON persistence.
//!
//! Load never fails: a missing file starts an empty store, and an
//! unreadable or corrupt file is moved aside (`*.corrupt`) before starting
//! empty so the next save cannot overwrite it. Records are read one by
//! one; a record that does not parse is skipped with a warning and the
//! original file is copied aside before anything overwrites it.
//!
//! Save writes the whole document to a temp file in the same directory
//! and renames it over the target, so a crash mid-write leaves the
//! previous file intact.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::models::UserDataStore;

/// JSON indentation used on disk.
const FILE_INDENT: &[u8] = b"    ";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize user data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The document with each section left as raw JSON values, so one bad
/// record does not sink the rest.
#[derive(Deserialize)]
struct RawUserData {
    #[serde(default)]
    medications: Option<Vec<Value>>,
    #[serde(default)]
    appointments: Option<Vec<Value>>,
    #[serde(default)]
    vital_signs: Option<Vec<Value>>,
    #[serde(default)]
    general_health_notes: Option<Vec<Value>>,
}

fn parse_section<T: DeserializeOwned>(
    section: &'static str,
    values: Option<Vec<Value>>,
    skipped: &mut usize,
) -> Vec<T> {
    values
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(section, index, error = %e, "Skipping unreadable record");
                *skipped += 1;
                None
            }
        })
        .collect()
}

fn parse_user_data(raw: RawUserData) -> (UserDataStore, usize) {
    let mut skipped = 0;
    let store = UserDataStore {
        medications: parse_section("medications", raw.medications, &mut skipped),
        appointments: parse_section("appointments", raw.appointments, &mut skipped),
        vital_signs: parse_section("vital_signs", raw.vital_signs, &mut skipped),
        general_health_notes: raw.general_health_notes.unwrap_or_default(),
    };
    (store, skipped)
}

/// Load the user data document, falling back to an empty store.
pub fn load_user_data(path: &Path) -> UserDataStore {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No user data file yet, starting empty");
            return UserDataStore::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "User data file unreadable, starting empty");
            quarantine(path);
            return UserDataStore::default();
        }
    };

    match serde_json::from_str::<RawUserData>(&raw) {
        Ok(document) => {
            let (store, skipped) = parse_user_data(document);
            if skipped > 0 {
                back_up(path, skipped);
            }
            tracing::info!(
                path = %path.display(),
                medications = store.medications.len(),
                appointments = store.appointments.len(),
                vital_signs = store.vital_signs.len(),
                "Loaded user data"
            );
            store
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "User data file corrupt, starting empty");
            quarantine(path);
            UserDataStore::default()
        }
    }
}

/// Atomically replace the user data file with `store`.
pub fn save_user_data(path: &Path, store: &UserDataStore) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;

    let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    let staged_path = staged.path().to_path_buf();

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        let formatter = PrettyFormatter::with_indent(FILE_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        store.serialize(&mut serializer)?;
        writer.flush().map_err(|source| StorageError::Io {
            path: staged_path.clone(),
            source,
        })?;
    }

    staged.as_file().sync_all().map_err(|source| StorageError::Io {
        path: staged_path,
        source,
    })?;

    staged.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), "Saved user data");
    Ok(())
}

/// Path a bad data file is moved to.
pub fn quarantine_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".corrupt");
    PathBuf::from(name)
}

fn quarantine(path: &Path) {
    let target = quarantine_path(path);
    match fs::rename(path, &target) {
        Ok(()) => tracing::warn!(moved_to = %target.display(), "Moved unreadable user data aside"),
        Err(e) => tracing::warn!(error = %e, "Could not move unreadable user data aside"),
    }
}

fn back_up(path: &Path, skipped: usize) {
    let target = quarantine_path(path);
    match fs::copy(path, &target) {
        Ok(_) => tracing::warn!(
            skipped,
            copied_to = %target.display(),
            "Kept a copy of user data with unreadable records"
        ),
        Err(e) => tracing::warn!(
            skipped,
            error = %e,
            "Could not copy user data with unreadable records"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationRecord;
    use chrono::NaiveDate;

    fn sample_store() -> UserDataStore {
        UserDataStore {
            medications: vec![MedicationRecord {
                id: "a1b2c3d4".into(),
                name: "Metformin".into(),
                dosage: "500mg".into(),
                schedule: "twice daily".into(),
                notes: String::new(),
                date_added: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_user_data(&dir.path().join("nobody_health_data.json"));
        assert_eq!(store, UserDataStore::default());
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        save_user_data(&path, &sample_store()).unwrap();

        let loaded = load_user_data(&path);
        assert_eq!(loaded, sample_store());
    }

    #[test]
    fn saved_file_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        save_user_data(&path, &UserDataStore::default()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n    \"medications\": []"), "got: {raw}");
        assert!(raw.contains("\"general_health_notes\""));
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("user_health_data.json");
        save_user_data(&path, &sample_store()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        save_user_data(&path, &sample_store()).unwrap();
        save_user_data(&path, &UserDataStore::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(load_user_data(&path), UserDataStore::default());
    }

    #[test]
    fn corrupt_file_loads_empty_and_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        fs::write(&path, "{ not json").unwrap();

        let store = load_user_data(&path);
        assert_eq!(store, UserDataStore::default());
        assert!(!path.exists());

        let aside = quarantine_path(&path);
        assert_eq!(fs::read_to_string(aside).unwrap(), "{ not json");
    }

    #[test]
    fn null_text_fields_from_older_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        let raw = r#"{
            "medications": [{"id": "a1b2c3d4", "name": "Metformin", "dosage": "500mg",
                             "schedule": "twice daily", "notes": "", "date_added": "2024-05-01"}],
            "appointments": [{"id": "e5f6a7b8", "doctor": "Dr. Lee", "date": "2024-06-10",
                              "time": null, "location": "Clinic", "notes": null}],
            "vital_signs": [],
            "general_health_notes": []
        }"#;
        fs::write(&path, raw).unwrap();

        let store = load_user_data(&path);
        assert_eq!(store.medications.len(), 1);
        assert_eq!(store.appointments.len(), 1);
        assert_eq!(store.appointments[0].time, "");
        assert!(path.exists());
        assert!(!quarantine_path(&path).exists());
    }

    #[test]
    fn unreadable_record_is_skipped_and_file_copied_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        let raw = r#"{
            "medications": [
                {"id": "a1b2c3d4", "name": "Metformin", "dosage": "500mg",
                 "schedule": "twice daily", "date_added": "2024-05-01"},
                {"id": "bad", "name": "Aspirin", "date_added": "yesterday"}
            ],
            "vital_signs": null
        }"#;
        fs::write(&path, raw).unwrap();

        let store = load_user_data(&path);
        assert_eq!(store.medications.len(), 1);
        assert_eq!(store.medications[0].name, "Metformin");
        assert!(store.vital_signs.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(quarantine_path(&path)).unwrap(), raw);
    }

    #[test]
    fn partial_document_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_health_data.json");
        fs::write(&path, r#"{"appointments": []}"#).unwrap();

        let store = load_user_data(&path);
        assert!(store.medications.is_empty());
        assert!(path.exists());
    }
}
