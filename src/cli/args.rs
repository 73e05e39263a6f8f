//! CLI argument definitions using clap
//!
//! Commands:
//! - saleslens serve --config <path>
//! - saleslens query --config <path>
//! - saleslens inspect --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// saleslens - search, filter, sort and summarize retail sales transactions
#[derive(Parser, Debug)]
#[command(name = "saleslens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the dataset and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./saleslens.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer JSON requests read from stdin, one per line
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./saleslens.json")]
        config: PathBuf,
    },

    /// Load the dataset and print the load report and filter options
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./saleslens.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
