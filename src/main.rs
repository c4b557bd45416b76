//! Binary entry point for memfold.
//!
//! This binary provides the CLI interface for the memfold hierarchical
//! memory discovery engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow terminal output in the main binary
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match memfold::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
