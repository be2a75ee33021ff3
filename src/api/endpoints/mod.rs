//! API endpoint handlers.
//!
//! Handlers are thin: they move blocking work off the executor and
//! delegate to `AppState`.

pub mod appointments;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod medications;
pub mod notes;
pub mod vitals;
