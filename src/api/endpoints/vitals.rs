use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MessageResponse};
use crate::models::VitalSignRecord;
use crate::records::NewVital;

#[derive(Serialize)]
pub struct VitalsResponse {
    pub vitals: Vec<VitalSignRecord>,
}

pub async fn add(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewVital>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let message = ctx
        .run_blocking(move |state| Ok(state.records()?.add_vital(req)?))
        .await?;
    Ok(Json(MessageResponse::ok(message)))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<VitalsResponse>, ApiError> {
    let vitals = ctx
        .run_blocking(|state| Ok(state.records()?.list_vitals().to_vec()))
        .await?;
    Ok(Json(VitalsResponse { vitals }))
}
