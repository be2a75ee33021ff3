//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Cache-Control header (set on every response)
//! 2. Audit logger

pub mod audit;
