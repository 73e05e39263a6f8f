//! CLI command implementations
//!
//! Every command follows the same boot sequence:
//! 1. Configuration load and validation
//! 2. Logging setup
//! 3. Dataset load
//! 4. Command-specific work (serve, answer stdin, inspect)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::api::{ApiHandler, ApiLimits, FilterOptionsResponse, MAX_PAGE_SIZE};
use crate::dataset::{Dataset, DatasetLoader, LoadReport};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, log_event, Event, LogFormat, ObservationScope};
use crate::query::DEFAULT_PAGE_SIZE;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::serve_lines;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file, JSON array or `.jsonl` (required).
    /// Relative paths resolve against the config file's directory.
    pub dataset_path: PathBuf,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Log level and format
    #[serde(default)]
    pub log: LogConfig,

    /// Page size used when a request gives none (default 10)
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a request may ask for (default 100)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

/// Logging section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if config.dataset_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.dataset_path = dir.join(&config.dataset_path);
            }
        }

        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(CliError::config_error("dataset_path must not be empty"));
        }

        self.http.validate().map_err(CliError::config_error)?;

        if self.default_page_size == 0 {
            return Err(CliError::config_error("default_page_size must be > 0"));
        }

        if self.max_page_size < self.default_page_size {
            return Err(CliError::config_error(format!(
                "max_page_size ({}) must be >= default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }

        Ok(())
    }

    /// Page-size limits for request decoding
    pub fn limits(&self) -> ApiLimits {
        ApiLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query { config } => query(&config),
        Command::Inspect { config } => inspect(&config),
    }
}

/// Load the dataset and serve the HTTP API until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = boot(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let (dataset, _) = load_dataset(&config.dataset_path)?;
    let handler = Arc::new(ApiHandler::new(dataset, config.limits()));
    let server = HttpServer::new(config.http.clone(), handler);
    log_event(Event::BootComplete);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Answer JSON requests from stdin until EOF
///
/// Each line is one request object, e.g.
/// `{"op": "transactions", "genders": ["Male"], "page": 2}`.
/// Malformed requests produce an error envelope and the loop continues.
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let (dataset, _) = load_dataset(&config.dataset_path)?;
    let handler = ApiHandler::new(dataset, config.limits());
    log_event(Event::BootComplete);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let answered = serve_lines(&handler, stdin.lock(), &mut out)?;

    log_event(Event::ShutdownStart);
    info!(answered, "stdin closed");
    log_event(Event::ShutdownComplete);
    Ok(())
}

/// Print the load report and filter options of the configured dataset
pub fn inspect(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let (dataset, report) = load_dataset(&config.dataset_path)?;
    let options = serde_json::to_value(filter_options(dataset))?;

    let summary = json!({
        "dataset_path": config.dataset_path.display().to_string(),
        "loaded": report.loaded,
        "skipped": report.skipped,
        "filter_options": options,
    });

    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &summary)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Load the dataset file into a shared snapshot
pub fn load_dataset(path: &Path) -> CliResult<(Arc<Dataset>, LoadReport)> {
    let scope = ObservationScope::new("DATASET_LOAD");

    match DatasetLoader::load_path(path) {
        Ok((dataset, report)) => {
            scope.complete();
            log_event(Event::DatasetLoaded);
            info!(
                path = %path.display(),
                loaded = report.loaded,
                skipped = report.skipped,
                "dataset ready"
            );
            Ok((Arc::new(dataset), report))
        }
        Err(e) => {
            scope.fail(&e.to_string());
            log_event(Event::DatasetLoadFailed);
            Err(e.into())
        }
    }
}

/// Filter options of an already loaded dataset
pub fn filter_options(dataset: Arc<Dataset>) -> FilterOptionsResponse {
    ApiHandler::new(dataset, ApiLimits::default()).filter_options()
}

/// Config load plus logging setup, shared by every command
fn boot(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    init_logging(&config.log.level, config.log.format);
    log_event(Event::BootStart);
    log_event(Event::ConfigLoaded);
    info!(
        config = %config_path.display(),
        dataset = %config.dataset_path.display(),
        "configuration loaded"
    );
    Ok(config)
}
