//! Dashboard summary: per-kind counts and the latest activity feed.

use serde::Serialize;

use crate::models::minute_timestamp::FORMAT as MINUTE_FORMAT;
use crate::models::{NoteRecord, UserDataStore};

/// How many entries the activity feed shows, and how many of each kind
/// are considered.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub medication_count: usize,
    pub appointment_count: usize,
    pub vital_count: usize,
    pub note_count: usize,
    pub recent_activities: Vec<Activity>,
}

/// Build the dashboard from the persisted records plus in-memory notes.
///
/// Activities come from the last five medications, appointments and
/// vitals; they are ordered by their timestamp text, newest first.
/// Medications carry a day, vitals a minute, and appointments their
/// scheduled day, so upcoming appointments sort ahead of past entries.
pub fn dashboard_summary(data: &UserDataStore, notes: &[NoteRecord]) -> DashboardSummary {
    let mut activities = Vec::new();

    for med in last_n(&data.medications) {
        activities.push(Activity {
            kind: "Medication".into(),
            description: format!("Added {} - {}", med.name, med.dosage),
            timestamp: med.date_added.format("%Y-%m-%d").to_string(),
        });
    }

    for apt in last_n(&data.appointments) {
        let date = apt.date.format("%Y-%m-%d").to_string();
        activities.push(Activity {
            kind: "Appointment".into(),
            description: format!("Scheduled with {} on {}", apt.doctor, date),
            timestamp: date,
        });
    }

    for vital in last_n(&data.vital_signs) {
        activities.push(Activity {
            kind: "Vital Sign".into(),
            description: format!("Recorded {}: {}", vital.vital_type, vital.value),
            timestamp: vital.timestamp.format(MINUTE_FORMAT).to_string(),
        });
    }

    // Stable sort: ties keep medication → appointment → vital order.
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities.truncate(RECENT_ACTIVITY_LIMIT);

    DashboardSummary {
        medication_count: data.medications.len(),
        appointment_count: data.appointments.len(),
        vital_count: data.vital_signs.len(),
        note_count: notes.len(),
        recent_activities: activities,
    }
}

fn last_n<T>(items: &[T]) -> &[T] {
    &items[items.len().saturating_sub(RECENT_ACTIVITY_LIMIT)..]
}
