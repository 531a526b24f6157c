//! CLI argument definitions using clap
//!
//! Commands:
//! - dishboard init --config <path>
//! - dishboard serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dishboard - restaurant listing backend with pinning and promotion
#[derive(Parser, Debug)]
#[command(name = "dishboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and an empty journal
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./dishboard.json")]
        config: PathBuf,
    },

    /// Replay the journal, verify invariants, and serve HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./dishboard.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
