//! Fibonacci kernels: naive recursion and a loop full of cancelling adds.

use crate::config::{Kernel, Nonce, Violation};

/// `F(k)` with `F(1) = F(2) = 1`, by fast doubling in wrapping arithmetic.
///
/// Shares no control flow with either kernel.
pub fn fibonacci_closed(k: u32) -> i32 {
    fn doubling(k: u32) -> (i32, i32) {
        if k == 0 {
            return (0, 1);
        }
        let (a, b) = doubling(k / 2);
        let c = a.wrapping_mul(b.wrapping_mul(2).wrapping_sub(a));
        let d = a.wrapping_mul(a).wrapping_add(b.wrapping_mul(b));
        if k % 2 == 0 {
            (c, d)
        } else {
            (d, c.wrapping_add(d))
        }
    }
    doubling(k).0
}

fn recurse(n: usize, nonce: i32) -> i32 {
    if n < 2 {
        return nonce;
    }
    recurse(n - 1, nonce).wrapping_add(recurse(n - 2, nonce))
}

#[derive(Debug, Default)]
pub struct FibonacciRecursive {
    result: i32,
}

impl FibonacciRecursive {
    pub const STANDARD_INPUT: i32 = 30;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Kernel for FibonacciRecursive {
    fn name(&self) -> &'static str {
        "fibonacci_recursive"
    }

    fn init(&mut self, _n: usize, _nonce: Nonce) {
        self.result = 0;
    }

    fn compute(&mut self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        self.result = recurse(n, nonce.get());
        Ok(())
    }

    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let expected = if n < 2 {
            nonce.get()
        } else {
            nonce.get().wrapping_mul(fibonacci_closed(n as u32 + 1))
        };
        if self.result != expected {
            return Err(Violation::WrongFibonacci {
                expected,
                actual: self.result,
            });
        }
        Ok(())
    }

    fn checksum(&self, _n: usize) -> i32 {
        self.result
    }
}

#[derive(Debug, Default)]
pub struct FibonacciLoop {
    result: i32,
}

impl FibonacciLoop {
    pub const STANDARD_INPUT: i32 = 30;
    const STEPS: i32 = 10;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Kernel for FibonacciLoop {
    fn name(&self) -> &'static str {
        "fibonacci_loop"
    }

    fn init(&mut self, _n: usize, _nonce: Nonce) {
        self.result = 0;
    }

    fn compute(&mut self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let mut result = 0i32;
        for _ in 0..Self::STEPS {
            let mut x = nonce.get();
            let mut y = nonce.get();
            for _ in 1..n {
                let sum = x.wrapping_add(y);
                // Six additions, five subtractions: the net effect is one `sum`.
                let mut next = sum;
                for _ in 0..5 {
                    next = next.wrapping_add(sum);
                }
                for _ in 0..5 {
                    next = next.wrapping_sub(sum);
                }
                x = y;
                y = next;
            }
            result = result.wrapping_add(y);
        }
        self.result = result;
        Ok(())
    }

    fn verify(&self, n: usize, nonce: Nonce) -> Result<(), Violation> {
        let k = n.max(1) as u32 + 1;
        let expected = nonce
            .get()
            .wrapping_mul(fibonacci_closed(k))
            .wrapping_mul(Self::STEPS);
        if self.result != expected {
            return Err(Violation::WrongFibonacci {
                expected,
                actual: self.result,
            });
        }
        Ok(())
    }

    fn checksum(&self, _n: usize) -> i32 {
        self.result
    }
}
