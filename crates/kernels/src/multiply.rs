//! Software shift-and-add multiply.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::{MULTIPLY_LHS_LCG, MULTIPLY_RHS_LCG};

pub const MULTIPLY_LEN: usize = 100;

/// Multiply by scanning the 32 bits of `x`; wraps like two's-complement hardware.
pub fn soft_multiply(mut x: i32, mut y: i32) -> i32 {
    let mut result = 0i32;
    for _ in 0..32 {
        if x & 1 == 1 {
            result = result.wrapping_add(y);
        }
        x >>= 1;
        y = y.wrapping_shl(1);
    }
    result
}

#[derive(Debug)]
pub struct Multiply {
    lhs: Vec<i32>,
    rhs: Vec<i32>,
    results: Vec<i32>,
}

impl Multiply {
    pub fn new() -> Self {
        Self {
            lhs: vec![0; MULTIPLY_LEN],
            rhs: vec![0; MULTIPLY_LEN],
            results: vec![0; MULTIPLY_LEN],
        }
    }
}

impl Default for Multiply {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for Multiply {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(MULTIPLY_LEN)
    }

    fn init(&mut self, _n: usize, nonce: Nonce) {
        MULTIPLY_LHS_LCG.fill(nonce, &mut self.lhs);
        MULTIPLY_RHS_LCG.fill(nonce, &mut self.rhs);
        self.results.fill(0);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        for ((out, &x), &y) in self.results[..n].iter_mut().zip(&self.lhs).zip(&self.rhs) {
            *out = soft_multiply(x, y);
        }
        Ok(())
    }

    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        let position = (0..n).position(|i| self.lhs[i].wrapping_mul(self.rhs[i]) != self.results[i]);
        match position {
            Some(index) => Err(Violation::WrongProduct { index }),
            None => Ok(()),
        }
    }

    fn checksum(&self, n: usize) -> i32 {
        self.results[..n]
            .iter()
            .fold(0i32, |acc, v| acc.wrapping_add(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_multiply_matches_hardware() {
        let cases = [
            (0, 0),
            (1, -1),
            (7, 6),
            (-13, 9),
            (10_008, 10_006),
            (i32::MAX, 3),
            (i32::MIN, -1),
        ];
        for (x, y) in cases {
            assert_eq!(soft_multiply(x, y), x.wrapping_mul(y), "{x} * {y}");
        }
    }

    #[test]
    fn operands_come_from_their_own_sequences() {
        let mut kernel = Multiply::new();
        kernel.init(MULTIPLY_LEN, Nonce::new(1));
        assert_eq!(kernel.lhs[0], (97 + 17) % 10_009);
        assert_eq!(kernel.rhs[0], (17 + 23) % 10_007);
    }

    #[test]
    fn verifier_accepts_iff_products_hold() -> Result<(), Violation> {
        let nonce = Nonce::new(64);
        let mut kernel = Multiply::new();
        kernel.run(-1, nonce)?;

        kernel.results[99] ^= 1;
        assert_eq!(
            kernel.verify(MULTIPLY_LEN, nonce),
            Err(Violation::WrongProduct { index: 99 })
        );
        assert_eq!(kernel.verify(MULTIPLY_LEN, nonce).unwrap_err().code(), 1);
        Ok(())
    }
}
