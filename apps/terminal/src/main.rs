//! # Shelfscan Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use shelfscan_terminal::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Shelfscan failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
