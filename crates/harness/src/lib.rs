//! Cross-validation and cycle-timing harness for CycleCheck.
//!
//! A run evaluates the calling-convention probes once and the workload
//! kernels for a number of rounds. Each evaluation times one candidate call,
//! checks it bit for bit against the reference, and folds the cycle count
//! into a geometric mean. The first divergence ends the run.

pub mod candidate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod nonce;
pub mod report;
pub mod session;
pub mod suite;
pub mod workload;

pub use candidate::*;
#[cfg(feature = "cli")]
pub use cli::*;
pub use error::*;
pub use nonce::*;
pub use report::*;
pub use session::*;
pub use suite::*;
pub use workload::*;
