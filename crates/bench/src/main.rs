//! Benchmark driver executable for CycleCheck.

use clap::Parser;
use cyclecheck_harness::cli::{run_cli, Cli};
use cyclecheck_harness::HarnessError;
use std::process::ExitCode;

/// A candidate diverged from the reference.
const EXIT_MISMATCH: u8 = 1;
/// Anything else went wrong before or after validation.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<HarnessError>() {
            Some(fatal) => {
                println!("{fatal}");
                ExitCode::from(EXIT_MISMATCH)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::from(EXIT_FAILURE)
            }
        },
    }
}
