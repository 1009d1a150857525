//! Native candidate backend for CycleCheck.
//!
//! Exposes the reference kernels and probe models through the same C calling
//! contract an external code generator has to meet, so the harness can be
//! exercised end to end without a foreign toolchain.

pub mod kernels;
pub mod probes;

pub use kernels::*;
pub use probes::*;
