//! Medication endpoints.
//!
//! - `POST /add_medication`: validate and persist
//! - `GET /get_medications`: full list

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MessageResponse};
use crate::models::MedicationRecord;
use crate::records::NewMedication;

#[derive(Serialize)]
pub struct MedicationsResponse {
    pub medications: Vec<MedicationRecord>,
}

pub async fn add(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewMedication>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let message = ctx
        .run_blocking(move |state| Ok(state.records()?.add_medication(req)?))
        .await?;
    Ok(Json(MessageResponse::ok(message)))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<MedicationsResponse>, ApiError> {
    let medications = ctx
        .run_blocking(|state| Ok(state.records()?.list_medications().to_vec()))
        .await?;
    Ok(Json(MedicationsResponse { medications }))
}
