//! Three-element 1D median filter.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::MEDIAN_LCG;

pub const MEDIAN_LEN: usize = 400;

/// Median of three without sorting.
pub fn median3(a: i32, b: i32, c: i32) -> i32 {
    if a < b {
        if b < c {
            b
        } else if c < a {
            a
        } else {
            c
        }
    } else if a < c {
        a
    } else if c < b {
        b
    } else {
        c
    }
}

/// Filter `input` into `output`; both ends are zeroed.
pub fn median_filter(input: &[i32], output: &mut [i32]) {
    let n = input.len().min(output.len());
    if n == 0 {
        return;
    }
    output[0] = 0;
    output[n - 1] = 0;
    for (i, window) in input[..n].windows(3).enumerate() {
        output[i + 1] = median3(window[0], window[1], window[2]);
    }
}

#[derive(Debug)]
pub struct Median {
    input: Vec<i32>,
    results: Vec<i32>,
}

impl Median {
    pub fn new() -> Self {
        Self {
            input: vec![0; MEDIAN_LEN],
            results: vec![0; MEDIAN_LEN],
        }
    }
}

impl Default for Median {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for Median {
    fn name(&self) -> &'static str {
        "median"
    }

    fn problem_size(&self, _input: i32) -> Option<usize> {
        Some(MEDIAN_LEN)
    }

    fn init(&mut self, _n: usize, nonce: Nonce) {
        MEDIAN_LCG.fill(nonce, &mut self.input);
        self.results.fill(0);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        median_filter(&self.input[..n], &mut self.results[..n]);
        Ok(())
    }

    /// Each interior result must be one of its three inputs with at least
    /// two of them on either side.
    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        if n == 0 {
            return Ok(());
        }
        for index in [0, n - 1] {
            if self.results[index] != 0 {
                return Err(Violation::NotMedian { index });
            }
        }
        for index in 1..n.saturating_sub(1) {
            let value = self.results[index];
            let window = &self.input[index - 1..=index + 1];
            let below = window.iter().filter(|&&x| x <= value).count();
            let above = window.iter().filter(|&&x| x >= value).count();
            if !window.contains(&value) || below < 2 || above < 2 {
                return Err(Violation::NotMedian { index });
            }
        }
        Ok(())
    }

    fn checksum(&self, n: usize) -> i32 {
        self.results[..n].iter().fold(0, |acc, v| acc ^ v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_three_covers_all_orders() {
        let orders = [(1, 2, 3), (1, 3, 2), (2, 1, 3), (2, 3, 1), (3, 1, 2), (3, 2, 1)];
        for (a, b, c) in orders {
            assert_eq!(median3(a, b, c), 2, "({a}, {b}, {c})");
        }
        assert_eq!(median3(5, 5, 1), 5);
        assert_eq!(median3(4, 4, 4), 4);
    }

    #[test]
    fn filter_zeroes_the_ends() {
        let input = [9, 1, 5, 3, 7];
        let mut output = [42; 5];
        median_filter(&input, &mut output);
        assert_eq!(output, [0, 5, 3, 5, 0]);
    }

    #[test]
    fn run_is_deterministic_and_verified() -> Result<(), Violation> {
        let mut kernel = Median::new();
        let first = kernel.run(-1, Nonce::new(11))?;
        assert_eq!(kernel.run(-1, Nonce::new(11))?, first);
        Ok(())
    }

    #[test]
    fn verifier_rejects_off_window_values() {
        let nonce = Nonce::new(5);
        let mut kernel = Median::new();
        kernel.init(MEDIAN_LEN, nonce);
        kernel.compute(MEDIAN_LEN, nonce).unwrap();
        kernel.results[10] = kernel.input[9].max(kernel.input[10]).max(kernel.input[11]) + 1;
        assert_eq!(
            kernel.verify(MEDIAN_LEN, nonce),
            Err(Violation::NotMedian { index: 10 })
        );

        kernel.compute(MEDIAN_LEN, nonce).unwrap();
        kernel.results[MEDIAN_LEN - 1] = 1;
        assert_eq!(
            kernel.verify(MEDIAN_LEN, nonce),
            Err(Violation::NotMedian {
                index: MEDIAN_LEN - 1
            })
        );
    }
}
