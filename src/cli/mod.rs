//! CLI module for Dishboard
//!
//! - init: create the data directory and an empty journal
//! - serve: replay the journal, verify invariants, serve HTTP

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, serve, Config};
pub use errors::{CliError, CliResult};
