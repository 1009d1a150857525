//! CLI wiring for the CycleCheck harness.

use crate::candidate::{CandidateSource, CandidateTable};
use crate::session::{Harness, HarnessOptions};
use crate::suite::{Suite, DEFAULT_REPETITIONS};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cyclecheck",
    about = "Cross-validate generated code against reference kernels and count its cycles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum CandidateArg {
    Native,
    External,
}

impl From<CandidateArg> for CandidateSource {
    fn from(value: CandidateArg) -> CandidateSource {
        match value {
            CandidateArg::Native => CandidateSource::Native,
            CandidateArg::External => CandidateSource::External,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate and time every workload against the selected candidate.
    Run {
        #[arg(long, value_enum, default_value = "native")]
        candidate: CandidateArg,
        /// Rounds over the kernels; probes run once regardless.
        #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
        repetitions: usize,
        /// Nonce seed for replaying a run.
        #[arg(long)]
        seed: Option<u64>,
        /// Flip the low bit of this workload's candidate output.
        #[arg(long, value_name = "WORKLOAD")]
        inject_fault: Option<String>,
        /// Write a JSON report after a successful run.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the workloads in evaluation order.
    List,
}

pub fn run_cli(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Run {
            candidate,
            repetitions,
            seed,
            inject_fault,
            report,
        } => {
            let options = HarnessOptions {
                candidate: candidate.into(),
                repetitions,
                seed,
                inject_fault,
                report,
            };
            let mut harness = Harness::new(options)?;
            let report = harness.run(|sample| println!("[{}] {}", sample.workload, sample.cycles))?;
            match report.geometric_mean {
                Some(mean) => println!("[AVERAGE] {mean}"),
                None => println!("[AVERAGE] -"),
            }
        }
        Command::List => {
            let suite = Suite::standard(&CandidateTable::native())?;
            for workload in suite.workloads() {
                println!(
                    "{:<36} {:<7} {}",
                    workload.name(),
                    workload.category(),
                    workload.input_label()
                );
            }
        }
    }
    Ok(())
}
