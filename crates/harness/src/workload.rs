//! Workload descriptors and the single-evaluation state machine.
//!
//! One evaluation draws a nonce, times exactly one candidate call, runs the
//! reference untimed and compares the two outputs. Anything but an exact
//! match is fatal.

use crate::error::HarnessError;
use cyclecheck_kernels::{Nonce, Violation};
use serde::{Deserialize, Serialize};
use std::ffi::c_int;
use std::fmt;
use std::hint::black_box;

/// Candidate under the C calling contract `Output f(Input, int nonce)`.
pub type Candidate<I, O> = unsafe extern "C" fn(I, c_int) -> O;

/// Trusted model for one workload.
pub type Reference<I, O> = Box<dyn FnMut(I, Nonce) -> Result<O, Violation>>;

/// Probes run once per harness run, kernels once per repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Probe,
    Kernel,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Probe => f.pad("probe"),
            Category::Kernel => f.pad("kernel"),
        }
    }
}

/// Scalar a candidate returns.
pub trait Output: Copy + fmt::Display {
    /// Exact equality; floats compare by bit pattern.
    fn matches(&self, other: &Self) -> bool;

    /// Same value with its least significant bit inverted.
    fn flip_low_bit(self) -> Self;
}

macro_rules! integer_output {
    ($($ty:ty),*) => {
        $(
            impl Output for $ty {
                fn matches(&self, other: &Self) -> bool {
                    self == other
                }

                fn flip_low_bit(self) -> Self {
                    self ^ 1
                }
            }
        )*
    };
}

macro_rules! float_output {
    ($($ty:ty),*) => {
        $(
            impl Output for $ty {
                fn matches(&self, other: &Self) -> bool {
                    self.to_bits() == other.to_bits()
                }

                fn flip_low_bit(self) -> Self {
                    <$ty>::from_bits(self.to_bits() ^ 1)
                }
            }
        )*
    };
}

integer_output!(i32, i64);
float_output!(f32, f64);

/// One accepted cycle measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub workload: &'static str,
    pub category: Category,
    pub nonce: Nonce,
    pub cycles: u64,
}

/// Type-erased view of a workload, so probes and kernels with different
/// input and output types share one ordered suite.
pub trait Evaluate {
    fn name(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Human-readable input for listings.
    fn input_label(&self) -> String;

    /// Corrupt every later candidate output of this workload.
    fn inject_fault(&mut self);

    fn evaluate(&mut self, nonce: Nonce) -> Result<Sample, HarnessError>;
}

pub struct Workload<I, O> {
    name: &'static str,
    category: Category,
    input: I,
    candidate: Candidate<I, O>,
    reference: Reference<I, O>,
    faulty: bool,
}

impl<I, O> Workload<I, O>
where
    I: Copy + fmt::Display,
    O: Output,
{
    /// `candidate` must have exactly the C signature `O(I, int)`.
    pub fn new(
        name: &'static str,
        category: Category,
        input: I,
        candidate: Candidate<I, O>,
        reference: Reference<I, O>,
    ) -> Self {
        Self {
            name,
            category,
            input,
            candidate,
            reference,
            faulty: false,
        }
    }
}

impl<I, O> Evaluate for Workload<I, O>
where
    I: Copy + fmt::Display,
    O: Output,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn input_label(&self) -> String {
        self.input.to_string()
    }

    fn inject_fault(&mut self) {
        self.faulty = true;
    }

    fn evaluate(&mut self, nonce: Nonce) -> Result<Sample, HarnessError> {
        let candidate = black_box(self.candidate);
        let input = black_box(self.input);

        // SAFETY: candidate tables only bind symbols declared with this exact
        // signature, and the input is a plain `#[repr(C)]` value.
        let (cycles, actual) =
            cyclecheck_timing::measure(|| unsafe { candidate(input, nonce.get()) });
        let actual = if self.faulty {
            actual.flip_low_bit()
        } else {
            black_box(actual)
        };

        let expected = (self.reference)(self.input, nonce).map_err(|violation| {
            HarnessError::Violation {
                workload: self.name,
                violation,
            }
        })?;

        if !expected.matches(&actual) {
            return Err(HarnessError::Mismatch {
                workload: self.name,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }

        tracing::debug!(workload = self.name, nonce = nonce.get(), cycles, "accepted");
        Ok(Sample {
            workload: self.name,
            category: self.category,
            nonce,
            cycles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn doubled(input: c_int, nonce: c_int) -> c_int {
        input * 2 + nonce
    }

    extern "C" fn off_by_one(input: c_int, nonce: c_int) -> c_int {
        input * 2 + nonce + 1
    }

    extern "C" fn negative_zero(_input: f64, _nonce: c_int) -> f64 {
        -0.0
    }

    fn doubled_reference() -> Reference<c_int, c_int> {
        Box::new(|input, nonce| Ok(input * 2 + nonce.get()))
    }

    fn int_workload(
        name: &'static str,
        category: Category,
        input: c_int,
        candidate: Candidate<c_int, c_int>,
    ) -> Workload<c_int, c_int> {
        Workload::new(name, category, input, candidate, doubled_reference())
    }

    #[test]
    fn matching_candidate_is_accepted() -> Result<(), HarnessError> {
        let mut workload = int_workload("doubled", Category::Kernel, 21, doubled);
        let sample = workload.evaluate(Nonce::new(5))?;
        assert_eq!(sample.workload, "doubled");
        assert_eq!(sample.nonce, Nonce::new(5));
        assert_eq!(sample.category, Category::Kernel);
        Ok(())
    }

    #[test]
    fn diverging_candidate_reports_both_values() {
        let mut workload = int_workload("doubled", Category::Kernel, 21, off_by_one);
        assert_eq!(
            workload.evaluate(Nonce::new(5)),
            Err(HarnessError::Mismatch {
                workload: "doubled",
                expected: "47".into(),
                actual: "48".into(),
            })
        );
    }

    #[test]
    fn injected_fault_turns_a_pass_into_a_mismatch() {
        let mut workload = int_workload("doubled", Category::Probe, 1, doubled);
        assert!(workload.evaluate(Nonce::new(1)).is_ok());
        workload.inject_fault();
        assert!(matches!(
            workload.evaluate(Nonce::new(1)),
            Err(HarnessError::Mismatch { .. })
        ));
    }

    #[test]
    fn reference_violation_is_fatal() {
        let candidate: Candidate<c_int, c_int> = doubled;
        let reference: Reference<c_int, c_int> =
            Box::new(|_, _| Err(Violation::Unsorted { index: 4 }));
        let mut workload = Workload::new("broken", Category::Kernel, 0, candidate, reference);
        assert_eq!(
            workload.evaluate(Nonce::new(2)),
            Err(HarnessError::Violation {
                workload: "broken",
                violation: Violation::Unsorted { index: 4 },
            })
        );
    }

    #[test]
    fn floats_compare_by_bits() {
        assert!(!0.0f64.matches(&-0.0));
        assert!(f32::NAN.matches(&f32::NAN));
        assert_eq!(1.5f32.flip_low_bit().to_bits(), 1.5f32.to_bits() ^ 1);

        let candidate: Candidate<f64, f64> = negative_zero;
        let reference: Reference<f64, f64> = Box::new(|_, _| Ok(0.0));
        let mut workload = Workload::new("zero", Category::Probe, 0.42, candidate, reference);
        assert!(matches!(
            workload.evaluate(Nonce::new(1)),
            Err(HarnessError::Mismatch { .. })
        ));
    }

    #[test]
    fn input_label_uses_display() {
        let workload = int_workload("doubled", Category::Kernel, -1, doubled);
        assert_eq!(workload.input_label(), "-1");
    }
}
