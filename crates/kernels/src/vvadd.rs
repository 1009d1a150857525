//! Element-wise vector add.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::{VVADD_LHS_LCG, VVADD_RHS_LCG};

pub const VVADD_LEN: usize = 1000;

#[derive(Debug)]
pub struct VectorAdd {
    lhs: Vec<i32>,
    rhs: Vec<i32>,
    results: Vec<i32>,
}

impl VectorAdd {
    pub fn new() -> Self {
        Self {
            lhs: vec![0; VVADD_LEN],
            rhs: vec![0; VVADD_LEN],
            results: vec![0; VVADD_LEN],
        }
    }
}

impl Default for VectorAdd {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for VectorAdd {
    fn name(&self) -> &'static str {
        "vvadd"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(VVADD_LEN)
    }

    fn init(&mut self, _n: usize, nonce: Nonce) {
        VVADD_LHS_LCG.fill(nonce, &mut self.lhs);
        for (rhs, &lhs) in self.rhs.iter_mut().zip(&self.lhs) {
            *rhs = VVADD_RHS_LCG.step(lhs);
        }
        self.results.fill(0);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        for ((out, a), b) in self.results[..n].iter_mut().zip(&self.lhs).zip(&self.rhs) {
            *out = a.wrapping_add(*b);
        }
        Ok(())
    }

    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        let position = (0..n).position(|i| self.lhs[i].wrapping_add(self.rhs[i]) != self.results[i]);
        match position {
            Some(index) => Err(Violation::WrongSum { index }),
            None => Ok(()),
        }
    }

    fn checksum(&self, n: usize) -> i32 {
        self.results[..n].iter().fold(0, |acc, v| acc ^ v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rhs_is_derived_from_lhs() {
        let mut kernel = VectorAdd::new();
        kernel.init(VVADD_LEN, Nonce::new(2));
        let x = (2 * 97 + 17) % 1009;
        assert_eq!(kernel.lhs[0], x);
        assert_eq!(kernel.rhs[0], (x * 17 + 23) % 1007);
    }

    #[test]
    fn verifier_flags_first_bad_sum() -> Result<(), Violation> {
        let nonce = Nonce::new(30);
        let mut kernel = VectorAdd::new();
        let checksum = kernel.run(-1, nonce)?;
        assert_eq!(kernel.run(-1, nonce)?, checksum);

        kernel.results[500] += 2;
        kernel.results[700] += 2;
        assert_eq!(
            kernel.verify(VVADD_LEN, nonce),
            Err(Violation::WrongSum { index: 500 })
        );
        Ok(())
    }
}
