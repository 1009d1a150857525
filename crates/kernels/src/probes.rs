//! Calling-convention probes.
//!
//! Each shape exercises a different argument-passing path: integer
//! registers, stack or hidden-pointer passing for large aggregates, mixed
//! integer/float classification, and the bare floating-point registers.
//! The models only add the fields and the nonce, so any disagreement points
//! at layout or ABI rather than arithmetic.

use crate::config::Nonce;
use std::ffi::{c_int, c_long};
use std::fmt;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Small {
    pub a: c_int,
    pub b: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Large {
    pub a: c_long,
    pub b: c_long,
    pub c: c_long,
    pub d: c_long,
    pub e: c_long,
    pub f: c_long,
    pub g: c_long,
    pub h: c_long,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallUgly {
    pub a: c_int,
    pub b: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LargeUgly {
    pub a: c_int,
    pub b: f32,
    pub c: c_int,
    pub d: f64,
    pub e: c_int,
    pub f: c_int,
    pub g: c_int,
    pub h: f64,
    pub i: c_int,
    pub j: c_int,
    pub k: c_int,
    pub l: f64,
}

impl Small {
    pub const STANDARD: Small = Small { a: 3, b: 4 };
}

impl Large {
    pub const STANDARD: Large = Large {
        a: 5,
        b: 6,
        c: 7,
        d: 8,
        e: 9,
        f: 10,
        g: 11,
        h: 12,
    };
}

impl SmallUgly {
    pub const STANDARD: SmallUgly = SmallUgly { a: 5, b: 6.0 };
}

impl LargeUgly {
    pub const STANDARD: LargeUgly = LargeUgly {
        a: 5,
        b: 6.0,
        c: 7,
        d: 8.0,
        e: 9,
        f: 10,
        g: 11,
        h: 12.0,
        i: 13,
        j: 14,
        k: 15,
        l: 16.0,
    };
}

pub const STANDARD_FLOAT: f32 = 0.42;
pub const STANDARD_DOUBLE: f64 = 0.42;

pub fn struct_small(input: Small, nonce: Nonce) -> c_int {
    input.a.wrapping_add(input.b).wrapping_add(nonce.get())
}

pub fn struct_large(input: Large, nonce: Nonce) -> c_long {
    [
        input.a, input.b, input.c, input.d, input.e, input.f, input.g, input.h,
    ]
    .into_iter()
    .fold(0 as c_long, c_long::wrapping_add)
    .wrapping_add(c_long::from(nonce.get()))
}

pub fn struct_small_ugly(input: SmallUgly, nonce: Nonce) -> f32 {
    input.a as f32 + input.b + nonce.get() as f32
}

/// Left-to-right sum under C promotion: single precision until the first
/// `double` field, double precision from there on.
pub fn struct_large_ugly(input: LargeUgly, nonce: Nonce) -> f64 {
    let head = input.a as f32 + input.b + input.c as f32;
    f64::from(head)
        + input.d
        + f64::from(input.e)
        + f64::from(input.f)
        + f64::from(input.g)
        + input.h
        + f64::from(input.i)
        + f64::from(input.j)
        + f64::from(input.k)
        + input.l
        + f64::from(nonce.get())
}

pub fn float(input: f32, nonce: Nonce) -> f32 {
    input + nonce.get() as f32
}

pub fn double(input: f64, nonce: Nonce) -> f64 {
    input + f64::from(nonce.get())
}

impl fmt::Display for Small {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{a={}, b={}}}", self.a, self.b)
    }
}

impl fmt::Display for Large {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}, {}, {}, {}, {}}}",
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h
        )
    }
}

impl fmt::Display for SmallUgly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{a={}, b={}}}", self.a, self.b)
    }
}

impl fmt::Display for LargeUgly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}}}",
            self.a,
            self.b,
            self.c,
            self.d,
            self.e,
            self.f,
            self.g,
            self.h,
            self.i,
            self.j,
            self.k,
            self.l
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn small_struct_sums_fields_and_nonce() {
        assert_eq!(struct_small(Small::STANDARD, Nonce::new(5)), 12);
    }

    #[test]
    fn large_struct_sums_all_eight_fields() {
        // 5 + 6 + ... + 12 = 68
        assert_eq!(struct_large(Large::STANDARD, Nonce::new(1)), 69);
    }

    #[test]
    fn ugly_structs_mix_precisions() {
        assert_abs_diff_eq!(
            struct_small_ugly(SmallUgly::STANDARD, Nonce::new(2)),
            13.0,
            epsilon = 1e-6
        );
        // 5 + 6 + 7 + 8 + 9 + 10 + 11 + 12 + 13 + 14 + 15 + 16 = 126
        assert_abs_diff_eq!(
            struct_large_ugly(LargeUgly::STANDARD, Nonce::new(4)),
            130.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn bare_scalars_add_nonce() {
        assert_abs_diff_eq!(float(STANDARD_FLOAT, Nonce::new(1)), 1.42, epsilon = 1e-6);
        assert_abs_diff_eq!(double(STANDARD_DOUBLE, Nonce::new(1)), 1.42, epsilon = 1e-12);
    }

    #[test]
    fn models_are_bit_reproducible() {
        let nonce = Nonce::new(77);
        assert_eq!(
            struct_large_ugly(LargeUgly::STANDARD, nonce).to_bits(),
            struct_large_ugly(LargeUgly::STANDARD, nonce).to_bits()
        );
        assert_eq!(
            float(STANDARD_FLOAT, nonce).to_bits(),
            float(STANDARD_FLOAT, nonce).to_bits()
        );
    }

    #[test]
    fn layouts_follow_c_rules() {
        assert_eq!(std::mem::size_of::<Small>(), 8);
        assert_eq!(std::mem::size_of::<SmallUgly>(), 8);
        assert_eq!(std::mem::size_of::<Large>(), 8 * std::mem::size_of::<c_long>());
        assert_eq!(std::mem::align_of::<LargeUgly>(), std::mem::align_of::<f64>());
    }
}
