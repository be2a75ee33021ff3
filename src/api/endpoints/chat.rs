//! `POST /chat`: one conversation turn.
//!
//! The reply is returned together with the current record lists so the
//! client can refresh its side panels in one round trip.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AppointmentRecord, MedicationRecord, VitalSignRecord};

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub medications: Vec<MedicationRecord>,
    pub appointments: Vec<AppointmentRecord>,
    pub vitals: Vec<VitalSignRecord>,
}

pub async fn send(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("No message provided".into()));
    }

    let reply = ctx
        .run_blocking(move |state| {
            let response = state.chat(&req.message)?;
            let records = state.records()?;
            Ok(ChatResponse {
                response,
                medications: records.list_medications().to_vec(),
                appointments: records.list_appointments().to_vec(),
                vitals: records.list_vitals().to_vec(),
            })
        })
        .await?;
    Ok(Json(reply))
}
