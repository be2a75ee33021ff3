//! Context Assembler: per-turn system context for the completion call.
//!
//! Rebuilt from the current records on every chat turn. Empty lists are
//! rendered as their empty-state sentence so the model reads "no
//! medications" rather than `[]`.

use serde_json::{json, Value};

use crate::models::UserDataStore;
use crate::records::RecordKind;

pub const SYSTEM_PROMPT: &str = r#"You are a virtual nursing assistant for elderly care. Your primary responsibilities include:
1. Helping seniors track their medications (names, dosages, schedules)
2. Managing healthcare appointments (dates, times, doctors, locations)
3. Recording and monitoring vital signs (blood pressure, heart rate, temperature, etc.)
4. Providing friendly reminders and health advice
5. Responding to health questions with accurate information

Always be patient, speak clearly, and focus on providing helpful healthcare assistance.
DO NOT provide medical diagnoses or treatment recommendations beyond general health advice.
Always suggest consulting healthcare providers for specific medical concerns.
Be compassionate and understand that elderly users may need extra patience and simple explanations."#;

pub const USER_CONTEXT_HEADER: &str = "USER CONTEXT:";

/// Build the full system block: persona prompt followed by the user context.
pub fn assemble_context(data: &UserDataStore) -> String {
    format!("{SYSTEM_PROMPT}\n\n{}", user_context(data))
}

/// The `USER CONTEXT:` section on its own.
pub fn user_context(data: &UserDataStore) -> String {
    let context = json!({
        "medications": list_or_empty(&data.medications, RecordKind::Medication),
        "appointments": list_or_empty(&data.appointments, RecordKind::Appointment),
        "vitals": list_or_empty(&data.vital_signs, RecordKind::VitalSign),
    });
    // serde_json::Value always serializes; the fallback only guards the API.
    let rendered = serde_json::to_string_pretty(&context).unwrap_or_else(|_| context.to_string());
    format!("{USER_CONTEXT_HEADER}\n{rendered}\n\n")
}

fn list_or_empty<T: serde::Serialize>(items: &[T], kind: RecordKind) -> Value {
    if items.is_empty() {
        return Value::String(kind.empty_text().to_string());
    }
    serde_json::to_value(items).unwrap_or_else(|e| {
        tracing::warn!(kind = kind.as_str(), error = %e, "Could not render records for context");
        Value::String(kind.empty_text().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MedicationRecord, VitalSignRecord};
    use chrono::NaiveDate;

    fn store_with_medication() -> UserDataStore {
        UserDataStore {
            medications: vec![MedicationRecord {
                id: "1234abcd".into(),
                name: "Atorvastatin".into(),
                dosage: "20mg".into(),
                schedule: "nightly".into(),
                notes: String::new(),
                date_added: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn context_starts_with_persona_prompt() {
        let text = assemble_context(&UserDataStore::default());
        assert!(text.starts_with("You are a virtual nursing assistant"));
        assert!(text.contains("DO NOT provide medical diagnoses"));
        assert!(text.contains("consulting healthcare providers"));
    }

    #[test]
    fn empty_lists_render_as_sentences() {
        let text = user_context(&UserDataStore::default());
        assert!(text.starts_with("USER CONTEXT:\n"));
        assert!(text.contains("\"medications\": \"No medications currently tracked.\""));
        assert!(text.contains("\"appointments\": \"No appointments currently scheduled.\""));
        assert!(text.contains("\"vitals\": \"No vital signs recorded yet.\""));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn records_are_embedded_as_json() {
        let text = user_context(&store_with_medication());
        let body = text
            .trim_start_matches("USER CONTEXT:\n")
            .trim_end();
        let parsed: Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["medications"][0]["name"], "Atorvastatin");
        assert_eq!(parsed["medications"][0]["date_added"], "2024-03-02");
        assert_eq!(parsed["vitals"], "No vital signs recorded yet.");
    }

    #[test]
    fn general_notes_are_not_included() {
        let mut data = store_with_medication();
        data.general_health_notes.push(json!("private scribble"));
        data.vital_signs.push(VitalSignRecord {
            id: "v1".into(),
            vital_type: "weight".into(),
            value: "70kg".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            notes: String::new(),
        });
        let text = assemble_context(&data);
        assert!(!text.contains("private scribble"));
        assert!(text.contains("70kg"));
    }

    #[test]
    fn context_reflects_current_records() {
        let first = assemble_context(&UserDataStore::default());
        let second = assemble_context(&store_with_medication());
        assert_ne!(first, second);
        assert!(second.contains("Atorvastatin"));
    }
}
