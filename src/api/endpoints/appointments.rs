//! Appointment endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MessageResponse};
use crate::models::AppointmentRecord;
use crate::records::NewAppointment;

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentRecord>,
}

/// `POST /add_appointment`. The date must be `YYYY-MM-DD`.
pub async fn add(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let message = ctx
        .run_blocking(move |state| Ok(state.records()?.add_appointment(req)?))
        .await?;
    Ok(Json(MessageResponse::ok(message)))
}

/// `GET /get_appointments`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<AppointmentsResponse>, ApiError> {
    let appointments = ctx
        .run_blocking(|state| Ok(state.records()?.list_appointments().to_vec()))
        .await?;
    Ok(Json(AppointmentsResponse { appointments }))
}
