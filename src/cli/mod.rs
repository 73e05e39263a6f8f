//! CLI module for saleslens
//!
//! Provides command-line interface for:
//! - serve: Load the dataset and serve the HTTP API
//! - query: Answer JSON requests from stdin, one per line
//! - inspect: Print the load report and filter options

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{inspect, load_dataset, query, run, run_command, serve, Config, LogConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, serve_lines, write_response};
