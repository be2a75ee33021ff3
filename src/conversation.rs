//! Conversation Service: one chat turn end to end.
//!
//! history → context → completion → history. Completion failures never
//! escape: they are logged and turned into a fallback reply, and the user
//! turn stays in history without a paired assistant turn.

use std::sync::Arc;

use crate::context::assemble_context;
use crate::llm::CompletionClient;
use crate::models::UserDataStore;
use crate::session::{SessionHistory, TurnRole};

pub const FAREWELL_REPLY: &str = "Goodbye! Take care of your health.";
pub const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

const FAREWELL_WORDS: &[&str] = &["exit", "quit", "bye"];

/// Reply text used when the completion call fails.
pub fn service_error_reply(error: &dyn std::fmt::Display) -> String {
    format!("I'm having trouble with the AI model: {error}. Please try again later.")
}

/// Whether `text` ends the conversation.
pub fn is_farewell(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    FAREWELL_WORDS.contains(&normalized.as_str())
}

pub struct ConversationService {
    client: Arc<dyn CompletionClient>,
    history: SessionHistory,
}

impl ConversationService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            history: SessionHistory::new(),
        }
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Produce the assistant reply for one user message.
    ///
    /// Blocks for the duration of the completion call.
    pub fn handle_user_message(&mut self, records: &UserDataStore, text: &str) -> String {
        if is_farewell(text) {
            return FAREWELL_REPLY.to_string();
        }

        self.history.append(TurnRole::User, text);

        let mut blocks = Vec::with_capacity(self.history.len() + 1);
        blocks.push(assemble_context(records));
        blocks.extend(self.history.turns().map(|t| t.content.clone()));

        tracing::debug!(blocks = blocks.len(), "Requesting completion");

        match self.client.complete(&blocks) {
            Ok(reply) if reply.trim().is_empty() => {
                tracing::warn!("Completion returned no text");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Ok(reply) => {
                self.history.append(TurnRole::Assistant, reply.clone());
                reply
            }
            Err(e) => {
                tracing::error!(error = %e, "Error generating response");
                service_error_reply(&e)
            }
        }
    }
}
