//! Note endpoints. Notes live in memory only and are never persisted.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MessageResponse};
use crate::models::NoteRecord;
use crate::records::NewNote;

#[derive(Serialize)]
pub struct NotesResponse {
    pub notes: Vec<NoteRecord>,
}

pub async fn add(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let message = ctx
        .run_blocking(move |state| Ok(state.records()?.add_note(req)?))
        .await?;
    Ok(Json(MessageResponse::ok(message)))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<NotesResponse>, ApiError> {
    let notes = ctx
        .run_blocking(|state| Ok(state.records()?.list_notes().to_vec()))
        .await?;
    Ok(Json(NotesResponse { notes }))
}
