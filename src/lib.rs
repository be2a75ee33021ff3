pub mod api;
pub mod config;
pub mod context;
pub mod conversation;
pub mod dashboard;
pub mod llm;
pub mod models;
pub mod records;
pub mod session;
pub mod state;
pub mod storage;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::llm::ServiceError;
use crate::state::AppState;

/// Errors that stop the service from starting or keep it from serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Model client error: {0}")]
    Service(#[from] ServiceError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error(transparent)]
    Server(#[from] api::ServerError),
}

pub fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = AppConfig::from_env().inspect_err(|e| tracing::error!("{e}"))?;
    tracing::info!(
        data_file = %app_config.user_data_path().display(),
        bind = %app_config.bind_addr,
        "Configuration loaded"
    );

    // Built outside the runtime: the blocking HTTP client must not be
    // created or dropped on an async worker.
    let state = Arc::new(AppState::from_config(&app_config)?);

    let runtime = tokio::runtime::Runtime::new().map_err(StartupError::Runtime)?;
    runtime.block_on(api::server::serve(state.clone(), app_config.bind_addr))?;
    drop(runtime);

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
