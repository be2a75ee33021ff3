//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run blocking work (file I/O, the completion call) off the async
    /// executor.
    pub async fn run_blocking<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.state.clone();
        tokio::task::spawn_blocking(move || work(&state)).await?
    }
}

/// Response body for the add-record endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }
}
