//! CLI-specific error types
//!
//! Every CLI error is fatal: the process prints it and exits non-zero.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("[DISH_CLI_CONFIG_ERROR] {0}")]
    Config(String),

    /// Filesystem failure while preparing the data directory
    #[error("[DISH_CLI_IO_ERROR] {0}")]
    Io(String),

    /// Table replay or server startup failed
    #[error("[DISH_CLI_BOOT_FAILED] {0}")]
    Boot(String),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn boot(msg: impl Into<String>) -> Self {
        Self::Boot(msg.into())
    }
}
