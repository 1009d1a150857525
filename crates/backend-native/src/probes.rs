//! C-ABI exports of the calling-convention probes.

use cyclecheck_kernels::probes::{self, Large, LargeUgly, Small, SmallUgly};
use cyclecheck_kernels::Nonce;
use std::ffi::{c_double, c_float, c_int, c_long};

pub extern "C" fn exotic_arguments_struct_small(input: Small, nonce: c_int) -> c_int {
    probes::struct_small(input, Nonce::new(nonce))
}

pub extern "C" fn exotic_arguments_struct_large(input: Large, nonce: c_int) -> c_long {
    probes::struct_large(input, Nonce::new(nonce))
}

pub extern "C" fn exotic_arguments_struct_small_ugly(input: SmallUgly, nonce: c_int) -> c_float {
    probes::struct_small_ugly(input, Nonce::new(nonce))
}

pub extern "C" fn exotic_arguments_struct_large_ugly(input: LargeUgly, nonce: c_int) -> c_double {
    probes::struct_large_ugly(input, Nonce::new(nonce))
}

pub extern "C" fn exotic_arguments_float(input: c_float, nonce: c_int) -> c_float {
    probes::float(input, Nonce::new(nonce))
}

pub extern "C" fn exotic_arguments_double(input: c_double, nonce: c_int) -> c_double {
    probes::double(input, Nonce::new(nonce))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cyclecheck_kernels::probes::{STANDARD_DOUBLE, STANDARD_FLOAT};

    #[test]
    fn integer_probes_cross_the_abi() {
        assert_eq!(exotic_arguments_struct_small(Small::STANDARD, 5), 12);
        assert_eq!(exotic_arguments_struct_large(Large::STANDARD, 2), 70);
    }

    #[test]
    fn float_probes_cross_the_abi() {
        assert_abs_diff_eq!(
            exotic_arguments_struct_small_ugly(SmallUgly::STANDARD, 9),
            20.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            exotic_arguments_struct_large_ugly(LargeUgly::STANDARD, 1),
            127.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(exotic_arguments_float(STANDARD_FLOAT, 3), 3.42, epsilon = 1e-6);
        assert_abs_diff_eq!(exotic_arguments_double(STANDARD_DOUBLE, 3), 3.42, epsilon = 1e-12);
    }

    #[test]
    fn exports_match_models_bitwise() {
        let nonce = 61;
        assert_eq!(
            exotic_arguments_struct_large_ugly(LargeUgly::STANDARD, nonce).to_bits(),
            probes::struct_large_ugly(LargeUgly::STANDARD, Nonce::new(nonce)).to_bits()
        );
        assert_eq!(
            exotic_arguments_double(STANDARD_DOUBLE, nonce).to_bits(),
            probes::double(STANDARD_DOUBLE, Nonce::new(nonce)).to_bits()
        );
    }
}
