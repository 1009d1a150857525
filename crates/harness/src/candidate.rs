//! Candidate function tables.

use crate::workload::Candidate;
use anyhow::Result;
use cyclecheck_kernels::probes::{Large, LargeUgly, Small, SmallUgly};
use serde::{Deserialize, Serialize};
use std::ffi::{c_double, c_float, c_int, c_long};
use std::fmt;

/// Where the functions under test come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// The crate's own kernels behind the C ABI.
    #[default]
    Native,
    /// A library emitted by the code generator under test, linked at build time.
    External,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Native => f.write_str("native"),
            CandidateSource::External => f.write_str("external"),
        }
    }
}

type KernelCandidate = Candidate<c_int, c_int>;

/// The nineteen candidate entry points of one source.
#[derive(Clone, Copy)]
pub struct CandidateTable {
    pub source: CandidateSource,
    pub struct_small: Candidate<Small, c_int>,
    pub struct_large: Candidate<Large, c_long>,
    pub struct_small_ugly: Candidate<SmallUgly, c_float>,
    pub struct_large_ugly: Candidate<LargeUgly, c_double>,
    pub float: Candidate<c_float, c_float>,
    pub double: Candidate<c_double, c_double>,
    pub fibonacci_recursive: KernelCandidate,
    pub fibonacci_loop: KernelCandidate,
    pub two_dimension_array: KernelCandidate,
    pub matrix_mul: KernelCandidate,
    pub matrix_add: KernelCandidate,
    pub graph_dijkstra: KernelCandidate,
    pub graph_floyd_warshall: KernelCandidate,
    pub median: KernelCandidate,
    pub multiply: KernelCandidate,
    pub qsort: KernelCandidate,
    pub rsort: KernelCandidate,
    pub towers: KernelCandidate,
    pub vvadd: KernelCandidate,
}

impl CandidateTable {
    pub fn native() -> Self {
        use cyclecheck_backend_native as native;

        Self {
            source: CandidateSource::Native,
            struct_small: native::exotic_arguments_struct_small,
            struct_large: native::exotic_arguments_struct_large,
            struct_small_ugly: native::exotic_arguments_struct_small_ugly,
            struct_large_ugly: native::exotic_arguments_struct_large_ugly,
            float: native::exotic_arguments_float,
            double: native::exotic_arguments_double,
            fibonacci_recursive: native::fibonacci_recursive,
            fibonacci_loop: native::fibonacci_loop,
            two_dimension_array: native::two_dimension_array,
            matrix_mul: native::matrix_mul,
            matrix_add: native::matrix_add,
            graph_dijkstra: native::graph_dijkstra,
            graph_floyd_warshall: native::graph_floyd_warshall,
            median: native::run_median,
            multiply: native::run_multiply,
            qsort: native::run_qsort,
            rsort: native::run_rsort,
            towers: native::run_towers,
            vvadd: native::run_vvadd,
        }
    }

    #[cfg(feature = "external")]
    pub fn external() -> Self {
        use cyclecheck_backend_external as external;

        tracing::info!(library = external::LINKED_CANDIDATE, "binding external candidate");
        Self {
            source: CandidateSource::External,
            struct_small: external::exotic_arguments_struct_small,
            struct_large: external::exotic_arguments_struct_large,
            struct_small_ugly: external::exotic_arguments_struct_small_ugly,
            struct_large_ugly: external::exotic_arguments_struct_large_ugly,
            float: external::exotic_arguments_float,
            double: external::exotic_arguments_double,
            fibonacci_recursive: external::fibonacci_recursive,
            fibonacci_loop: external::fibonacci_loop,
            two_dimension_array: external::two_dimension_array,
            matrix_mul: external::matrix_mul,
            matrix_add: external::matrix_add,
            graph_dijkstra: external::graph_dijkstra,
            graph_floyd_warshall: external::graph_floyd_warshall,
            median: external::run_median,
            multiply: external::run_multiply,
            qsort: external::run_qsort,
            rsort: external::run_rsort,
            towers: external::run_towers,
            vvadd: external::run_vvadd,
        }
    }

    pub fn for_source(source: CandidateSource) -> Result<Self> {
        match source {
            CandidateSource::Native => Ok(Self::native()),
            #[cfg(feature = "external")]
            CandidateSource::External => Ok(Self::external()),
            #[cfg(not(feature = "external"))]
            CandidateSource::External => {
                anyhow::bail!("external candidates need a build with the `external` feature")
            }
        }
    }

    /// Candidate for the kernel registered under `name`.
    pub fn kernel(&self, name: &str) -> Option<KernelCandidate> {
        let candidate = match name {
            "fibonacci_recursive" => self.fibonacci_recursive,
            "fibonacci_loop" => self.fibonacci_loop,
            "two_dimension_array" => self.two_dimension_array,
            "matrix_mul" => self.matrix_mul,
            "matrix_add" => self.matrix_add,
            "graph_dijkstra" => self.graph_dijkstra,
            "graph_floyd_warshall" => self.graph_floyd_warshall,
            "median" => self.median,
            "multiply" => self.multiply,
            "qsort" => self.qsort,
            "rsort" => self.rsort,
            "towers" => self.towers,
            "vvadd" => self.vvadd,
            _ => return None,
        };
        Some(candidate)
    }
}

impl fmt::Debug for CandidateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateTable")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
