//! Dense integer matrix kernels over a fixed 30x30 store.

use crate::config::{Kernel, Nonce, Violation};
use crate::generator::StrideCounter;
use ndarray::{s, Array2, ArrayView2, Zip};

pub const MATRIX_CAPACITY: usize = 30;

/// Operands and result shared by both matrix kernels.
#[derive(Debug, Clone)]
pub struct MatrixStore {
    a: Array2<i32>,
    b: Array2<i32>,
    c: Array2<i32>,
}

impl MatrixStore {
    pub fn new() -> Self {
        let shape = (MATRIX_CAPACITY, MATRIX_CAPACITY);
        Self {
            a: Array2::zeros(shape),
            b: Array2::zeros(shape),
            c: Array2::zeros(shape),
        }
    }

    /// Fill A then B from one counter, so B continues where A stopped.
    fn fill(&mut self, n: usize, nonce: Nonce) {
        let mut counter = StrideCounter::new(nonce);
        for mut view in [self.a.slice_mut(s![..n, ..n]), self.b.slice_mut(s![..n, ..n])] {
            view.iter_mut().for_each(|value| *value = counter.next_value());
        }
        self.c.fill(0);
    }

    fn views(&self, n: usize) -> (ArrayView2<'_, i32>, ArrayView2<'_, i32>, ArrayView2<'_, i32>) {
        (
            self.a.slice(s![..n, ..n]),
            self.b.slice(s![..n, ..n]),
            self.c.slice(s![..n, ..n]),
        )
    }

    fn xor_result(&self, n: usize) -> i32 {
        self.c
            .slice(s![..n, ..n])
            .iter()
            .fold(0, |acc, value| acc ^ value)
    }
}

impl Default for MatrixStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct MatrixMul {
    store: MatrixStore,
}

impl MatrixMul {
    pub const STANDARD_INPUT: i32 = 30;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Kernel for MatrixMul {
    fn name(&self) -> &'static str {
        "matrix_mul"
    }

    fn capacity(&self) -> Option<usize> {
        Some(MATRIX_CAPACITY)
    }

    fn init(&mut self, n: usize, nonce: Nonce) {
        self.store.fill(n, nonce);
    }

    fn compute(&mut self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        let MatrixStore { a, b, c } = &mut self.store;
        let (a, b) = (a.slice(s![..n, ..n]), b.slice(s![..n, ..n]));
        let mut c = c.slice_mut(s![..n, ..n]);
        for i in 0..n {
            for j in 0..n {
                c[(i, j)] = (0..n).fold(0i32, |acc, k| {
                    acc.wrapping_add(a[(i, k)].wrapping_mul(b[(k, j)]))
                });
            }
        }
        Ok(())
    }

    /// Row sums of `C` must equal `A` applied to the row sums of `B`.
    fn verify(&self, n: usize, _nonce: Nonce) -> Result<(), Violation> {
        let (a, b, c) = self.store.views(n);
        let b_row_sums: Vec<i32> = b
            .outer_iter()
            .map(|row| row.iter().fold(0i32, |acc, v| acc.wrapping_add(*v)))
            .collect();

        for (row, (a_row, c_row)) in a.outer_iter().zip(c.outer_iter()).enumerate() {
            let projected = a_row
                .iter()
                .zip(&b_row_sums)
                .fold(0i32, |acc, (x, s)| acc.wrapping_add(x.wrapping_mul(*s)));
            let actual = c_row.iter().fold(0i32, |acc, v| acc.wrapping_add(*v));
            if projected != actual {
                return Err(Violation::WrongRowSum { row });
            }
        }
        Ok(())
    }

    fn checksum(&self, n: usize) -> i32 {
        self.store.xor_result(n)
    }
}

#[derive(Debug, Default)]
pub struct MatrixAdd {
    store: MatrixStore,
}

impl MatrixAdd {
    pub const STANDARD_INPUT: i32 = 30;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Kernel for MatrixAdd {
    fn name(&self) -> &'static str {
        "matrix_add"
    }

    fn capacity(&self) -> Option<usize> {
        Some(MATRIX_CAPACITY)
    }

    fn init(&mut self, n: usize, nonce: Nonce) {
        self.store.fill(n, nonce);
    }

    fn compute(&mut self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let scale = nonce.get();
        let MatrixStore { a, b, c } = &mut self.store;
        Zip::from(c.slice_mut(s![..n, ..n]))
            .and(a.slice(s![..n, ..n]))
            .and(b.slice(s![..n, ..n]))
            .for_each(|c, &a, &b| *c = a.wrapping_add(scale.wrapping_mul(b)));
        Ok(())
    }

    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let (a, b, c) = self.store.views(n);
        let position = a
            .iter()
            .zip(b.iter())
            .zip(c.iter())
            .position(|((a, b), c)| a.wrapping_add(nonce.get().wrapping_mul(*b)) != *c);
        match position {
            Some(index) => Err(Violation::WrongSum { index }),
            None => Ok(()),
        }
    }

    fn checksum(&self, n: usize) -> i32 {
        self.store.xor_result(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_values() -> Result<(), Violation> {
        // nonce 1: A = [1], B = [3]
        assert_eq!(MatrixMul::new().run(1, Nonce::new(1))?, 3);
        assert_eq!(MatrixAdd::new().run(1, Nonce::new(1))?, 4);
        Ok(())
    }

    #[test]
    fn oversized_input_returns_nonce() -> Result<(), Violation> {
        assert_eq!(MatrixMul::new().run(31, Nonce::new(17))?, 17);
        assert_eq!(MatrixAdd::new().run(1000, Nonce::new(5))?, 5);
        Ok(())
    }

    #[test]
    fn repeated_runs_are_identical() -> Result<(), Violation> {
        let mut kernel = MatrixMul::new();
        let first = kernel.run(30, Nonce::new(23))?;
        let _ = kernel.run(12, Nonce::new(99))?;
        assert_eq!(kernel.run(30, Nonce::new(23))?, first);
        Ok(())
    }

    #[test]
    fn product_matches_ndarray_dot() {
        let mut kernel = MatrixMul::new();
        let nonce = Nonce::new(6);
        kernel.init(8, nonce);
        kernel.compute(8, nonce).unwrap();
        let (a, b, c) = kernel.store.views(8);
        assert_eq!(a.dot(&b), c);
    }

    #[test]
    fn verifier_catches_corrupted_cells() {
        let nonce = Nonce::new(3);
        let mut mul = MatrixMul::new();
        mul.init(10, nonce);
        mul.compute(10, nonce).unwrap();
        mul.store.c[(4, 7)] += 1;
        assert_eq!(mul.verify(10, nonce), Err(Violation::WrongRowSum { row: 4 }));

        let mut add = MatrixAdd::new();
        add.init(10, nonce);
        add.compute(10, nonce).unwrap();
        add.store.c[(0, 2)] -= 1;
        assert_eq!(add.verify(10, nonce), Err(Violation::WrongSum { index: 2 }));
    }
}
