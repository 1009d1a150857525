//! Quadratic in-place xor fold over a small array.

use crate::config::{Kernel, Nonce, Violation};

pub const FOLD_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct XorFold {
    data: Vec<i32>,
}

impl XorFold {
    pub const STANDARD_INPUT: i32 = 100;

    pub fn new() -> Self {
        Self {
            data: vec![0; FOLD_CAPACITY],
        }
    }
}

impl Default for XorFold {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for XorFold {
    fn name(&self) -> &'static str {
        "two_dimension_array"
    }

    fn capacity(&self) -> Option<usize> {
        Some(FOLD_CAPACITY)
    }

    fn init(&mut self, n: usize, nonce: Nonce) {
        for (i, value) in self.data[..n].iter_mut().enumerate() {
            *value = (i as i32).wrapping_add(nonce.get());
        }
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        for i in 0..n {
            for j in 0..n {
                self.data[i] ^= self.data[j];
            }
        }
        Ok(())
    }

    /// Row `i` xors itself to zero at `j == i`, so only the untouched tail
    /// `j > i` survives: each slot ends as the xor of `j + nonce` over `j > i`.
    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let mut suffix = 0;
        for index in (0..n).rev() {
            if self.data[index] != suffix {
                return Err(Violation::WrongFold { index });
            }
            suffix ^= (index as i32).wrapping_add(nonce.get());
        }
        Ok(())
    }

    fn checksum(&self, n: usize) -> i32 {
        self.data[..n].iter().fold(0i32, |acc, v| acc.wrapping_add(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_fold_by_hand() -> Result<(), Violation> {
        // nonce 1, n 3: initial [1, 2, 3] -> [2 ^ 3, 3, 0] = [1, 3, 0]
        assert_eq!(XorFold::new().run(3, Nonce::new(1))?, 4);
        Ok(())
    }

    #[test]
    fn oversized_input_returns_nonce() -> Result<(), Violation> {
        assert_eq!(XorFold::new().run(101, Nonce::new(12))?, 12);
        Ok(())
    }

    #[test]
    fn verifier_rejects_skipped_row() {
        let nonce = Nonce::new(8);
        let mut kernel = XorFold::new();
        kernel.init(50, nonce);
        kernel.compute(50, nonce).unwrap();
        assert_eq!(kernel.verify(50, nonce), Ok(()));

        kernel.data[20] ^= kernel.data[0];
        assert_eq!(
            kernel.verify(50, nonce),
            Err(Violation::WrongFold { index: 20 })
        );
    }
}
