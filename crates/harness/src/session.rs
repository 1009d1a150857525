//! Harness session: options, suite assembly and the reported run.

use crate::candidate::{CandidateSource, CandidateTable};
use crate::nonce::NonceSource;
use crate::report::RunReport;
use crate::suite::{Suite, DEFAULT_REPETITIONS};
use crate::workload::Sample;
use anyhow::Result;
use cyclecheck_timing::CounterSource;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub candidate: CandidateSource,
    /// Kernel rounds; probes always run exactly once.
    pub repetitions: usize,
    /// Nonce seed; fresh entropy when unset.
    pub seed: Option<u64>,
    /// Workload whose candidate output gets its low bit flipped.
    pub inject_fault: Option<String>,
    pub report: Option<PathBuf>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            candidate: CandidateSource::Native,
            repetitions: DEFAULT_REPETITIONS,
            seed: None,
            inject_fault: None,
            report: None,
        }
    }
}

pub struct Harness {
    options: HarnessOptions,
    suite: Suite,
    nonces: NonceSource,
}

impl Harness {
    pub fn new(options: HarnessOptions) -> Result<Self> {
        let table = CandidateTable::for_source(options.candidate)?;
        let mut suite = Suite::standard(&table)?;
        if let Some(name) = &options.inject_fault {
            suite.inject_fault(name)?;
            info!(workload = %name, "fault injected");
        }
        let nonces = match options.seed {
            Some(seed) => NonceSource::with_seed(seed),
            None => NonceSource::from_entropy(),
        };
        Ok(Self {
            options,
            suite,
            nonces,
        })
    }

    /// Run the suite to completion or to the first fatal divergence, which is
    /// returned as a [`crate::HarnessError`] inside the `anyhow` error.
    pub fn run<F>(&mut self, observe: F) -> Result<RunReport>
    where
        F: FnMut(&Sample),
    {
        let seed = self.nonces.seed();
        info!(
            candidate = %self.options.candidate,
            counter = CounterSource::current().as_str(),
            seed,
            repetitions = self.options.repetitions,
            workloads = self.suite.len(),
            "run started"
        );

        let summary = self
            .suite
            .run(self.options.repetitions, &mut self.nonces, observe)?;

        info!(
            samples = summary.samples.len(),
            geometric_mean = summary.geometric_mean,
            "run finished"
        );

        let report = RunReport::new(
            self.options.candidate,
            seed,
            self.options.repetitions,
            summary,
        );
        if let Some(path) = &self.options.report {
            report.save(path)?;
            info!(path = %path.display(), "report written");
        }
        Ok(report)
    }
}
