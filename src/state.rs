//! Shared application state.
//!
//! `AppState` is built once at startup and handed to the HTTP layer
//! inside an `Arc`. Each component sits behind its own `Mutex`, so
//! concurrent requests are serialized per component rather than racing
//! on the data file.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::conversation::ConversationService;
use crate::llm::{CompletionClient, GeminiClient, ServiceError};
use crate::records::RecordStore;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Internal lock poisoned")]
    LockPoisoned,
}

pub struct AppState {
    records: Mutex<RecordStore>,
    conversation: Mutex<ConversationService>,
}

impl AppState {
    pub fn new(records: RecordStore, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            records: Mutex::new(records),
            conversation: Mutex::new(ConversationService::new(client)),
        }
    }

    /// Build state from configuration: load the user's records and
    /// create the Gemini client.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let client = GeminiClient::from_config(config)?;
        tracing::info!(model = client.model(), "Completion client ready");
        let records = RecordStore::open(config.user_data_path());
        Ok(Self::new(records, Arc::new(client)))
    }

    pub fn records(&self) -> Result<MutexGuard<'_, RecordStore>, StateError> {
        self.records.lock().map_err(|_| StateError::LockPoisoned)
    }

    pub fn conversation(&self) -> Result<MutexGuard<'_, ConversationService>, StateError> {
        self.conversation.lock().map_err(|_| StateError::LockPoisoned)
    }

    /// Run one chat turn: snapshot the records, release the record lock,
    /// then hold the conversation lock for the completion call.
    pub fn chat(&self, message: &str) -> Result<String, StateError> {
        let snapshot = self.records()?.snapshot();
        let mut conversation = self.conversation()?;
        Ok(conversation.handle_user_message(&snapshot, message))
    }
}
