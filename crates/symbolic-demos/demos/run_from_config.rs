//! Loads a JSON config file (path given as the first CLI argument) and runs
//! `simulate`, writing `events.csv`/`values.csv` to the working directory.
//!
//! Run with: `cargo run -p symbolic-demos --bin run_from_config -- path/to/config.json`

use std::path::PathBuf;
use std::process::ExitCode;

use symbolic_config::loader::load_config;
use symbolic_core::simulate::simulate;
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: run_from_config <config.json>");
        return ExitCode::FAILURE;
    };

    let config = match load_config(&PathBuf::from(path)) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = simulate(&config) {
        error!(error = %e, "simulation failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
