use serde::{Deserialize, Serialize};

use super::{AppointmentRecord, MedicationRecord, VitalSignRecord};

/// The per-user JSON document. Always written with all four keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDataStore {
    #[serde(default)]
    pub medications: Vec<MedicationRecord>,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
    #[serde(default)]
    pub vital_signs: Vec<VitalSignRecord>,
    /// Carried through untouched; nothing in the service writes here.
    #[serde(default)]
    pub general_health_notes: Vec<serde_json::Value>,
}
