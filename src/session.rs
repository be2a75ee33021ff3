//! Session History: bounded log of recent conversational turns.
//!
//! In memory only. Eviction is by count: once more than `capacity` turns
//! are held, the oldest are dropped first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::MAX_SESSION_TURNS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTurn {
    pub role: TurnRole,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SessionHistory {
    turns: VecDeque<SessionTurn>,
    capacity: usize,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SESSION_TURNS)
    }

    /// A history that keeps at most `capacity` turns (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, role: TurnRole, content: impl Into<String>) {
        self.turns.push_back(SessionTurn {
            role,
            content: content.into(),
        });
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &SessionTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&SessionTurn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}
