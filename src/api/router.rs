//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Middleware stack (outermost → innermost):
//! 1. Cache-Control: no-store → 2. Audit logger

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Build the API router over shared application state.
pub fn api_router(state: Arc<AppState>) -> Router {
    build_router(ApiContext::new(state))
}

fn build_router(ctx: ApiContext) -> Router {
    // .with_state() converts Router<ApiContext> → Router<()> so the
    // from_fn layers below are compatible.
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/chat", post(endpoints::chat::send))
        .route("/add_medication", post(endpoints::medications::add))
        .route("/get_medications", get(endpoints::medications::list))
        .route("/add_appointment", post(endpoints::appointments::add))
        .route("/get_appointments", get(endpoints::appointments::list))
        .route("/add_vital", post(endpoints::vitals::add))
        .route("/get_vitals", get(endpoints::vitals::list))
        .route("/add_note", post(endpoints::notes::add))
        .route("/get_notes", get(endpoints::notes::list))
        .route("/dashboard_data", get(endpoints::dashboard::summary))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
