//! CLI command implementations
//!
//! `init` prepares the data directory; `serve` boots the table and the
//! HTTP server. The tokio runtime is started here, not in `main`.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::observability::{log_fatal, log_info};
use crate::rest_api::{router, AppState};
use crate::store::RestaurantTable;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the journal lives
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./dishboard-data"),
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("Failed to read config {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(CliError::config("data_dir must not be empty"));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> CliResult<SocketAddr> {
        self.listen_addr
            .parse()
            .map_err(|e| CliError::config(format!("Invalid listen_addr '{}': {}", self.listen_addr, e)))
    }
}

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
    }
}

/// `init`: write a default config if the file is missing, then create
/// the data directory and an empty journal.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::io(format!("Failed to encode default config: {}", e)))?;
        fs::write(config_path, json).map_err(|e| {
            CliError::io(format!(
                "Failed to write config {}: {}",
                config_path.display(),
                e
            ))
        })?;
        config
    };

    // opening the table creates the directory and journal file
    RestaurantTable::open(&config.data_dir)
        .map_err(|e| CliError::boot(format!("Failed to initialize table: {}", e)))?;

    log_info(
        "cli.initialized",
        &[("data_dir", &config.data_dir.display().to_string())],
    );
    Ok(())
}

/// `serve`: replay the journal, verify invariants, serve HTTP.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let addr = config.socket_addr()?;

    let table = match RestaurantTable::open(&config.data_dir) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            log_fatal("boot.table_unusable", &[("code", e.code())]);
            return Err(CliError::boot(e.to_string()));
        }
    };

    let app = router(Arc::new(AppState::new(table)));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::boot(format!("Failed to bind {}: {}", addr, e)))?;
        log_info("boot.serving", &[("listen_addr", &addr.to_string())]);
        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::boot(format!("Server error: {}", e)))
    })
}
