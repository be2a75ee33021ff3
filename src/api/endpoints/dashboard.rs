//! `GET /dashboard_data`: counts and recent activity.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{dashboard_summary, DashboardSummary};

pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = ctx
        .run_blocking(|state| {
            let records = state.records()?;
            Ok(dashboard_summary(records.data(), records.list_notes()))
        })
        .await?;
    Ok(Json(summary))
}
