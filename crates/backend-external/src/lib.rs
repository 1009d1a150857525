//! External candidate backend for CycleCheck.
//!
//! Declares the nineteen C symbols a code generator under test must provide.
//! The library is located at build time through `CYCLECHECK_CANDIDATE_LIB_DIR`
//! and `CYCLECHECK_CANDIDATE_LIB` (default `candidate`, i.e. `libcandidate`).

use cyclecheck_kernels::probes::{Large, LargeUgly, Small, SmallUgly};
use std::ffi::{c_double, c_float, c_int, c_long};

/// `dir/name` of the linked candidate library, empty when none was linked.
pub const LINKED_CANDIDATE: &str = env!("CYCLECHECK_LINKED_CANDIDATE");

extern "C" {
    pub fn exotic_arguments_struct_small(input: Small, nonce: c_int) -> c_int;
    pub fn exotic_arguments_struct_large(input: Large, nonce: c_int) -> c_long;
    pub fn exotic_arguments_struct_small_ugly(input: SmallUgly, nonce: c_int) -> c_float;
    pub fn exotic_arguments_struct_large_ugly(input: LargeUgly, nonce: c_int) -> c_double;
    pub fn exotic_arguments_float(input: c_float, nonce: c_int) -> c_float;
    pub fn exotic_arguments_double(input: c_double, nonce: c_int) -> c_double;

    pub fn fibonacci_recursive(n: c_int, nonce: c_int) -> c_int;
    pub fn fibonacci_loop(n: c_int, nonce: c_int) -> c_int;
    pub fn two_dimension_array(n: c_int, nonce: c_int) -> c_int;
    pub fn matrix_mul(n: c_int, nonce: c_int) -> c_int;
    pub fn matrix_add(n: c_int, nonce: c_int) -> c_int;
    pub fn graph_dijkstra(n: c_int, nonce: c_int) -> c_int;
    pub fn graph_floyd_warshall(n: c_int, nonce: c_int) -> c_int;

    pub fn run_median(dummy: c_int, nonce: c_int) -> c_int;
    pub fn run_multiply(dummy: c_int, nonce: c_int) -> c_int;
    pub fn run_qsort(dummy: c_int, nonce: c_int) -> c_int;
    pub fn run_rsort(dummy: c_int, nonce: c_int) -> c_int;
    pub fn run_towers(dummy: c_int, nonce: c_int) -> c_int;
    pub fn run_vvadd(dummy: c_int, nonce: c_int) -> c_int;
}
