//! Fatal validation outcomes.

use cyclecheck_kernels::Violation;
use thiserror::Error;

/// A condition that ends the run immediately: the candidate cannot be trusted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    #[error("[{workload}] mismatched result (expected: {expected}, actual: {actual})")]
    Mismatch {
        workload: &'static str,
        expected: String,
        actual: String,
    },
    #[error("[{workload}] reference verifier failed with code {code}: {violation}", code = .violation.code())]
    Violation {
        workload: &'static str,
        violation: Violation,
    },
}

impl HarnessError {
    pub fn workload(&self) -> &'static str {
        match self {
            HarnessError::Mismatch { workload, .. } | HarnessError::Violation { workload, .. } => {
                workload
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_renders_like_the_driver() {
        let err = HarnessError::Mismatch {
            workload: "qsort",
            expected: "812".into(),
            actual: "813".into(),
        };
        assert_eq!(
            err.to_string(),
            "[qsort] mismatched result (expected: 812, actual: 813)"
        );
        assert_eq!(err.workload(), "qsort");
    }

    #[test]
    fn violation_carries_its_code() {
        let err = HarnessError::Violation {
            workload: "towers",
            violation: Violation::MoveCount {
                expected: 127,
                actual: 3,
            },
        };
        assert!(err.to_string().starts_with("[towers] reference verifier failed with code 6"));
    }
}
