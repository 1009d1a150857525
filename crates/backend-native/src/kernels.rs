//! C-ABI exports of the workload kernels.
//!
//! Each export owns a private kernel instance per thread, separate from any
//! instance the harness uses as its reference.

use cyclecheck_kernels::fibonacci::{FibonacciLoop, FibonacciRecursive};
use cyclecheck_kernels::fold::XorFold;
use cyclecheck_kernels::graph::{Dijkstra, FloydWarshall};
use cyclecheck_kernels::matrix::{MatrixAdd, MatrixMul};
use cyclecheck_kernels::median::Median;
use cyclecheck_kernels::multiply::Multiply;
use cyclecheck_kernels::sort::{QuickSort, RadixSort};
use cyclecheck_kernels::towers::Towers;
use cyclecheck_kernels::vvadd::VectorAdd;
use cyclecheck_kernels::{Kernel, Nonce};
use std::cell::RefCell;
use std::ffi::c_int;

macro_rules! export_kernel {
    ($symbol:ident => $kernel:ty) => {
        pub extern "C" fn $symbol(input: c_int, nonce: c_int) -> c_int {
            thread_local! {
                static STATE: RefCell<$kernel> = RefCell::new(<$kernel>::new());
            }
            STATE.with(|state| state.borrow_mut().run_raw(input, Nonce::new(nonce)))
        }
    };
}

export_kernel!(fibonacci_recursive => FibonacciRecursive);
export_kernel!(fibonacci_loop => FibonacciLoop);
export_kernel!(two_dimension_array => XorFold);
export_kernel!(matrix_mul => MatrixMul);
export_kernel!(matrix_add => MatrixAdd);
export_kernel!(graph_dijkstra => Dijkstra);
export_kernel!(graph_floyd_warshall => FloydWarshall);
export_kernel!(run_median => Median);
export_kernel!(run_multiply => Multiply);
export_kernel!(run_qsort => QuickSort);
export_kernel!(run_rsort => RadixSort);
export_kernel!(run_towers => Towers);
export_kernel!(run_vvadd => VectorAdd);

#[cfg(test)]
mod tests {
    use super::*;
    use cyclecheck_kernels::fibonacci::fibonacci_closed;
    use cyclecheck_kernels::KernelRegistry;

    #[test]
    fn exports_agree_with_fresh_reference_kernels() {
        let exports: [(&str, extern "C" fn(c_int, c_int) -> c_int); 8] = [
            ("fibonacci_loop", fibonacci_loop),
            ("two_dimension_array", two_dimension_array),
            ("matrix_mul", matrix_mul),
            ("matrix_add", matrix_add),
            ("median", run_median),
            ("multiply", run_multiply),
            ("rsort", run_rsort),
            ("vvadd", run_vvadd),
        ];
        let mut registry = KernelRegistry::with_default_kernels().into_iter();
        for (name, export) in exports {
            let mut entry = registry
                .by_ref()
                .find(|entry| entry.name() == name)
                .unwrap();
            for nonce in [1, 42, 100] {
                assert_eq!(
                    export(entry.input, nonce),
                    entry.kernel.run_raw(entry.input, Nonce::new(nonce)),
                    "{name} with nonce {nonce}"
                );
            }
        }
    }

    #[test]
    fn recursive_fibonacci_scales_with_nonce() {
        assert_eq!(fibonacci_recursive(20, 3), 3 * fibonacci_closed(21));
    }

    #[test]
    fn towers_reports_success_as_zero() {
        assert_eq!(run_towers(-1, 7), 0);
    }

    #[test]
    fn oversized_inputs_echo_the_nonce() {
        assert_eq!(matrix_mul(31, 9), 9);
        assert_eq!(graph_floyd_warshall(1001, 4), 4);
    }
}
