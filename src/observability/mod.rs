//! # Observability
//!
//! Structured logging for the mutation and boot paths.

pub mod logger;

pub use logger::{log_error, log_fatal, log_info, log_warn, Logger, Severity};
