//! The ordered workload suite and its run loop.

use crate::candidate::CandidateTable;
use crate::error::HarnessError;
use crate::nonce::NonceSource;
use crate::workload::{Candidate, Category, Evaluate, Output, Reference, Sample, Workload};
use anyhow::{anyhow, Result};
use cyclecheck_kernels::probes::{self, Large, LargeUgly, Small, SmallUgly};
use cyclecheck_kernels::{KernelRegistry, Nonce};
use cyclecheck_timing::GeometricMean;
use std::fmt;
use tracing::error;

pub const DEFAULT_REPETITIONS: usize = 10;

/// Samples of a completed run, in evaluation order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub samples: Vec<Sample>,
    pub geometric_mean: Option<f64>,
}

pub struct Suite {
    workloads: Vec<Box<dyn Evaluate>>,
}

fn probe<I, O>(
    name: &'static str,
    input: I,
    candidate: Candidate<I, O>,
    model: fn(I, Nonce) -> O,
) -> Box<dyn Evaluate>
where
    I: Copy + fmt::Display + 'static,
    O: Output + 'static,
{
    let reference: Reference<I, O> = Box::new(move |input, nonce| Ok(model(input, nonce)));
    Box::new(Workload::new(name, Category::Probe, input, candidate, reference))
}

impl Suite {
    pub fn new() -> Self {
        Self {
            workloads: Vec::new(),
        }
    }

    /// The six calling-convention probes followed by every default kernel.
    pub fn standard(table: &CandidateTable) -> Result<Self> {
        let mut suite = Self::new();
        suite.push(probe(
            "exotic_arguments_struct_small",
            Small::STANDARD,
            table.struct_small,
            probes::struct_small,
        ));
        suite.push(probe(
            "exotic_arguments_struct_large",
            Large::STANDARD,
            table.struct_large,
            probes::struct_large,
        ));
        suite.push(probe(
            "exotic_arguments_struct_small_ugly",
            SmallUgly::STANDARD,
            table.struct_small_ugly,
            probes::struct_small_ugly,
        ));
        suite.push(probe(
            "exotic_arguments_struct_large_ugly",
            LargeUgly::STANDARD,
            table.struct_large_ugly,
            probes::struct_large_ugly,
        ));
        suite.push(probe(
            "exotic_arguments_float",
            probes::STANDARD_FLOAT,
            table.float,
            probes::float,
        ));
        suite.push(probe(
            "exotic_arguments_double",
            probes::STANDARD_DOUBLE,
            table.double,
            probes::double,
        ));

        for entry in KernelRegistry::with_default_kernels() {
            let name = entry.name();
            let candidate = table
                .kernel(name)
                .ok_or_else(|| anyhow!("no {} candidate for kernel `{name}`", table.source))?;
            let mut kernel = entry.kernel;
            let reference: Reference<i32, i32> =
                Box::new(move |input, nonce| kernel.run(input, nonce));
            suite.push(Box::new(Workload::new(
                name,
                Category::Kernel,
                entry.input,
                candidate,
                reference,
            )));
        }
        Ok(suite)
    }

    pub fn push(&mut self, workload: Box<dyn Evaluate>) {
        self.workloads.push(workload);
    }

    pub fn workloads(&self) -> impl Iterator<Item = &dyn Evaluate> + '_ {
        self.workloads.iter().map(|workload| workload.as_ref())
    }

    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Flip the low bit of every candidate output of `name`.
    pub fn inject_fault(&mut self, name: &str) -> Result<()> {
        let workload = self
            .workloads
            .iter_mut()
            .find(|workload| workload.name() == name)
            .ok_or_else(|| anyhow!("unknown workload `{name}`"))?;
        workload.inject_fault();
        Ok(())
    }

    /// Probes once, then `repetitions` rounds of kernels, a fresh nonce per
    /// evaluation. Stops at the first divergence.
    pub fn run<F>(
        &mut self,
        repetitions: usize,
        nonces: &mut NonceSource,
        mut observe: F,
    ) -> Result<RunSummary, HarnessError>
    where
        F: FnMut(&Sample),
    {
        let mut mean = GeometricMean::new();
        let mut samples = Vec::new();

        let mut record = |workload: &mut Box<dyn Evaluate>| -> Result<(), HarnessError> {
            let nonce = nonces.draw();
            match workload.evaluate(nonce) {
                Ok(sample) => {
                    observe(&sample);
                    mean.push(sample.cycles);
                    samples.push(sample);
                    Ok(())
                }
                Err(err) => {
                    error!(
                        workload = err.workload(),
                        nonce = nonce.get(),
                        error = %err,
                        "run aborted"
                    );
                    Err(err)
                }
            }
        };

        for workload in self.workloads.iter_mut() {
            if workload.category() == Category::Probe {
                record(workload)?;
            }
        }
        for _ in 0..repetitions {
            for workload in self.workloads.iter_mut() {
                if workload.category() == Category::Kernel {
                    record(workload)?;
                }
            }
        }

        Ok(RunSummary {
            samples,
            geometric_mean: mean.finish(),
        })
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::new()
    }
}
