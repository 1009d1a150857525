//! Free-running cycle counters.
//!
//! x86 and x86_64 read the time-stamp counter between two `lfence`s so the
//! read cannot drift into the measured call. aarch64 reads the virtual timer
//! `cntvct_el0`, riscv64 the `cycle` CSR. Everything else counts monotonic
//! nanoseconds from a process-wide epoch.

use serde::Serialize;

/// Which counter `now` reads on this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterSource {
    Rdtsc,
    Cntvct,
    Rdcycle,
    MonotonicNanos,
}

impl CounterSource {
    pub const fn current() -> Self {
        if cfg!(any(target_arch = "x86_64", target_arch = "x86")) {
            CounterSource::Rdtsc
        } else if cfg!(target_arch = "aarch64") {
            CounterSource::Cntvct
        } else if cfg!(target_arch = "riscv64") {
            CounterSource::Rdcycle
        } else {
            CounterSource::MonotonicNanos
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CounterSource::Rdtsc => "rdtsc",
            CounterSource::Cntvct => "cntvct_el0",
            CounterSource::Rdcycle => "rdcycle",
            CounterSource::MonotonicNanos => "monotonic_ns",
        }
    }
}

#[inline(always)]
pub fn now() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_x86_64()
    }

    #[cfg(target_arch = "x86")]
    {
        read_x86()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_aarch64()
    }

    #[cfg(target_arch = "riscv64")]
    {
        read_riscv64()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "riscv64"
    )))]
    {
        read_monotonic()
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_x86_64() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    // SAFETY: lfence and rdtsc are baseline x86_64 instructions.
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "x86")]
#[inline(always)]
fn read_x86() -> u64 {
    use core::arch::x86::{_mm_lfence, _rdtsc};
    // SAFETY: requires SSE2 for lfence, which every rdtsc-capable target here has.
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_aarch64() -> u64 {
    let value: u64;
    // SAFETY: cntvct_el0 is readable from EL0 on every supported OS.
    unsafe {
        core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) value, options(nostack));
    }
    value
}

#[cfg(target_arch = "riscv64")]
#[inline(always)]
fn read_riscv64() -> u64 {
    let value: u64;
    // SAFETY: reads a user-level CSR and touches no memory.
    unsafe {
        core::arch::asm!("rdcycle {}", out(reg) value, options(nomem, nostack));
    }
    value
}

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "x86",
    target_arch = "aarch64",
    target_arch = "riscv64"
)))]
fn read_monotonic() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let elapsed = EPOCH.get_or_init(Instant::now).elapsed();
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Counter delta around exactly one call of `f`.
#[inline(always)]
pub fn measure<F, R>(f: F) -> (u64, R)
where
    F: FnOnce() -> R,
{
    let start = now();
    let result = f();
    let end = now();
    (end.saturating_sub(start), result)
}
