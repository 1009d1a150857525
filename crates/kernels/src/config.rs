//! Shared kernel types: the nonce, verifier violations and the kernel lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Per-evaluation perturbation fed identically to candidate and reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(i32);

impl Nonce {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which peg of the Towers of Hanoi board a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Peg {
    Source,
    Spare,
    Destination,
}

/// Structural invariant broken by a kernel's output.
///
/// Every variant maps onto the numeric code the C benchmarks return from
/// their `verify_*` helpers, so a failing candidate and the reference
/// agree on what the failure looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    #[error("output not non-decreasing at index {index}")]
    Unsorted { index: usize },
    #[error("product at index {index} differs from operand1 * operand2")]
    WrongProduct { index: usize },
    #[error("sum at index {index} differs from operand1 + operand2")]
    WrongSum { index: usize },
    #[error("filtered value at index {index} is not the median of its window")]
    NotMedian { index: usize },
    #[error("row {row} of the product disagrees with its row-sum projection")]
    WrongRowSum { row: usize },
    #[error("distance to vertex {vertex} is not a shortest distance")]
    NotShortest { vertex: usize },
    #[error("fibonacci result {actual} differs from closed form {expected}")]
    WrongFibonacci { expected: i32, actual: i32 },
    #[error("xor fold at index {index} differs from its suffix xor")]
    WrongFold { index: usize },
    #[error("{peg:?} peg still holds discs")]
    PegNotEmpty { peg: Peg },
    #[error("destination peg holds {actual} discs, expected {expected}")]
    DestinationSize { expected: usize, actual: usize },
    #[error("disc at position {position} of the destination peg is out of order")]
    DestinationOrder { position: usize },
    #[error("solver made {actual} moves, expected {expected}")]
    MoveCount { expected: i32, actual: i32 },
    #[error("node pool exhausted")]
    PoolExhausted,
}

impl Violation {
    /// Numeric violation code; never zero.
    pub fn code(&self) -> i32 {
        match self {
            Violation::PegNotEmpty { peg: Peg::Source } => 2,
            Violation::PegNotEmpty { peg: Peg::Spare } => 3,
            Violation::PegNotEmpty { peg: Peg::Destination } | Violation::DestinationSize { .. } => 4,
            Violation::DestinationOrder { .. } => 5,
            Violation::MoveCount { .. } => 6,
            Violation::PoolExhausted => 7,
            _ => 1,
        }
    }
}

/// Collapse a verifier outcome to the C convention: 0 on pass, code otherwise.
pub fn verdict_code(verdict: Result<(), Violation>) -> i32 {
    match verdict {
        Ok(()) => 0,
        Err(violation) => violation.code(),
    }
}

/// A self-verifying workload kernel owning its fixed-capacity dataset.
///
/// The dataset is rebuilt by `init` on every `run`; nothing carries over
/// between invocations.
pub trait Kernel: Send {
    fn name(&self) -> &'static str;

    /// Largest problem size the dataset can hold, if the input selects one.
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Problem size for `input`, or `None` when it does not fit.
    fn problem_size(&self, input: i32) -> Option<usize> {
        let n = usize::try_from(input).unwrap_or(0);
        match self.capacity() {
            Some(capacity) if n > capacity => None,
            _ => Some(n),
        }
    }

    fn init(&mut self, n: usize, nonce: Nonce);

    fn compute(&mut self, n: usize, nonce: Nonce) -> Result<(), Violation>;

    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation>;

    fn checksum(&self, n: usize) -> i32;

    /// Full lifecycle. Oversized inputs short-circuit to the nonce.
    fn run(&mut self, input: i32, nonce: Nonce) -> Result<i32, Violation> {
        let Some(n) = self.problem_size(input) else {
            tracing::warn!(
                kernel = self.name(),
                input,
                capacity = self.capacity(),
                "input exceeds kernel capacity, returning nonce"
            );
            return Ok(nonce.get());
        };

        self.init(n, nonce);
        self.compute(n, nonce)?;
        self.verify(n, nonce)?;
        Ok(self.checksum(n))
    }

    /// `run` under the C calling contract: a violation becomes its code.
    fn run_raw(&mut self, input: i32, nonce: Nonce) -> i32 {
        self.run(input, nonce).unwrap_or_else(|violation| violation.code())
    }
}

pub type DynKernel = Box<dyn Kernel>;
