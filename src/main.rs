//! saleslens CLI entry point
//!
//! Parses arguments, dispatches to a command and exits with the error's
//! status code on failure.
//! All logic lives in the CLI module.

use saleslens::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
