//! Cycle measurement and score aggregation for CycleCheck.

pub mod aggregate;
pub mod cycles;

pub use aggregate::*;
pub use cycles::*;
