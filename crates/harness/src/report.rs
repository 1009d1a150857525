//! JSON run reports.

use crate::candidate::CandidateSource;
use crate::suite::RunSummary;
use crate::workload::Sample;
use anyhow::{Context, Result};
use cyclecheck_timing::CounterSource;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Everything needed to replay and compare a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub candidate: CandidateSource,
    pub counter: CounterSource,
    /// Seed of the nonce source; rerunning with it reproduces every nonce.
    pub seed: u64,
    pub repetitions: usize,
    pub generated_at_unix_ms: u128,
    pub samples: Vec<Sample>,
    pub geometric_mean: Option<f64>,
}

impl RunReport {
    pub fn new(
        candidate: CandidateSource,
        seed: u64,
        repetitions: usize,
        summary: RunSummary,
    ) -> Self {
        let generated_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| Duration::from_secs(0))
            .as_millis();

        Self {
            candidate,
            counter: CounterSource::current(),
            seed,
            repetitions,
            generated_at_unix_ms,
            samples: summary.samples,
            geometric_mean: summary.geometric_mean,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::Category;
    use cyclecheck_kernels::Nonce;

    fn summary() -> RunSummary {
        RunSummary {
            samples: vec![Sample {
                workload: "towers",
                category: Category::Kernel,
                nonce: Nonce::new(17),
                cycles: 4096,
            }],
            geometric_mean: Some(4096.0),
        }
    }

    #[test]
    fn serializes_samples_and_settings() -> Result<()> {
        let report = RunReport::new(CandidateSource::Native, 99, 3, summary());
        let value = serde_json::to_value(&report)?;

        assert_eq!(value["candidate"], "native");
        assert_eq!(value["seed"], 99);
        assert_eq!(value["repetitions"], 3);
        assert_eq!(value["samples"][0]["workload"], "towers");
        assert_eq!(value["samples"][0]["category"], "kernel");
        assert_eq!(value["samples"][0]["nonce"], 17);
        assert_eq!(value["geometric_mean"], 4096.0);
        Ok(())
    }
}
