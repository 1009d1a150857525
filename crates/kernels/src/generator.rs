//! Deterministic input generators seeded from the nonce.
//!
//! None of this is meant to be random in any strong sense. The only
//! requirements are that a nonce always reproduces the same data and that
//! the values stay small enough for the downstream arithmetic.

use crate::config::Nonce;

/// Linear-congruential recurrence `x' = (x * multiplier + increment) % modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    pub multiplier: i64,
    pub increment: i64,
    pub modulus: i64,
}

impl Lcg {
    pub const fn new(multiplier: i64, increment: i64, modulus: i64) -> Self {
        Self {
            multiplier,
            increment,
            modulus,
        }
    }

    /// Apply the recurrence once to an arbitrary value.
    pub fn step(&self, x: i32) -> i32 {
        let next = (i64::from(x) * self.multiplier + self.increment) % self.modulus;
        next as i32
    }

    pub fn sequence(self, nonce: Nonce) -> LcgSequence {
        LcgSequence {
            lcg: self,
            state: nonce.get(),
        }
    }

    /// Fill `out` with successive draws seeded from `nonce`.
    pub fn fill(self, nonce: Nonce, out: &mut [i32]) {
        out.iter_mut()
            .zip(self.sequence(nonce))
            .for_each(|(slot, value)| *slot = value);
    }
}

pub const QSORT_LCG: Lcg = Lcg::new(97, 17, 100_009);
pub const RSORT_LCG: Lcg = Lcg::new(97, 17, 100_007);
pub const MEDIAN_LCG: Lcg = Lcg::new(97, 17, 1000);
pub const MULTIPLY_LHS_LCG: Lcg = Lcg::new(97, 17, 10_009);
pub const MULTIPLY_RHS_LCG: Lcg = Lcg::new(17, 23, 10_007);
pub const VVADD_LHS_LCG: Lcg = Lcg::new(97, 17, 1009);
/// Applied to the current left-hand draw, not to its own previous value.
pub const VVADD_RHS_LCG: Lcg = Lcg::new(17, 23, 1007);

/// Infinite iterator over an [`Lcg`] starting after the seed.
#[derive(Debug, Clone)]
pub struct LcgSequence {
    lcg: Lcg,
    state: i32,
}

impl Iterator for LcgSequence {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.state = self.lcg.step(self.state);
        Some(self.state)
    }
}

/// Counter used to fill graph weights and matrices.
///
/// Each draw pre-increments and yields the counter, then skips one value
/// unless the counter landed on a multiple of `nonce + 1`.
#[derive(Debug, Clone)]
pub struct StrideCounter {
    x: i32,
    period: i32,
}

impl StrideCounter {
    pub fn new(nonce: Nonce) -> Self {
        Self {
            x: 0,
            period: nonce.get().wrapping_add(1),
        }
    }

    pub fn next_value(&mut self) -> i32 {
        self.x = self.x.wrapping_add(1);
        let value = self.x;
        if self.period == 0 || self.x % self.period != 0 {
            self.x = self.x.wrapping_add(1);
        }
        value
    }
}
