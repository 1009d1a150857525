//! Self-verifying workload kernels and calling-convention probes for CycleCheck.
//!
//! Every kernel regenerates its dataset from the nonce, runs its algorithm,
//! and checks a structural invariant before producing the scalar that a
//! candidate implementation has to reproduce.

pub mod config;
pub mod fibonacci;
pub mod fold;
pub mod generator;
pub mod graph;
pub mod matrix;
pub mod median;
pub mod multiply;
pub mod probes;
pub mod registry;
pub mod sort;
pub mod towers;
pub mod vvadd;

pub use config::*;
pub use registry::*;
