//! High-Precision Timing
//!
//! Readings pair a monotonic nanosecond clock with the CPU cycle counter
//! (RDTSCP on x86_64, CNTVCT_EL0 on AArch64). The runner only ever sees the
//! `Clock` trait, so tests can substitute deterministic clocks.

use std::cell::Cell;

// ─── Inline cycle counter helpers ────────────────────────────────────────────

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006.
    // It waits for all prior instructions to complete before reading.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 (userspace) on all AArch64
    // implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides real cycle counters.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

// ─── Readings ────────────────────────────────────────────────────────────────

/// A point-in-time clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    /// Nanoseconds since the clock's origin
    pub nanos: u64,
    /// Raw cycle/tick count (0 when unavailable)
    pub cycles: u64,
}

impl Reading {
    /// Elapsed (nanos, cycles) from `earlier` to `self`, saturating at zero
    #[inline(always)]
    pub fn since(&self, earlier: Reading) -> (u64, u64) {
        (
            self.nanos.saturating_sub(earlier.nanos),
            self.cycles.saturating_sub(earlier.cycles),
        )
    }
}

/// Time source used to stamp the start and end of every measured execution
pub trait Clock {
    /// Take a reading
    fn now(&self) -> Reading;
}

/// Monotonic wall clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Reading {
        let cycles = read_cycles();
        Reading {
            nanos: self.origin.elapsed().as_nanos() as u64,
            cycles,
        }
    }
}

/// Deterministic clock that advances by a fixed step on every reading.
///
/// With a step of zero every measured execution takes exactly 0 ns.
#[derive(Debug, Default)]
pub struct SteppingClock {
    step_ns: u64,
    next: Cell<u64>,
}

impl SteppingClock {
    /// Create a clock advancing `step_ns` per reading
    pub fn new(step_ns: u64) -> Self {
        Self {
            step_ns,
            next: Cell::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Reading {
        let nanos = self.next.get();
        self.next.set(nanos.saturating_add(self.step_ns));
        Reading { nanos, cycles: 0 }
    }
}

/// Number of CPU indices `pin_to_cpu` can address
#[cfg(target_os = "linux")]
pub const CPU_SET_CAPACITY: usize = libc::CPU_SETSIZE as usize;

/// Number of CPU indices `pin_to_cpu` can address
#[cfg(not(target_os = "linux"))]
pub const CPU_SET_CAPACITY: usize = usize::MAX;

/// Set CPU affinity to pin the current thread to a specific core
///
/// This improves TSC stability by avoiding core migrations. Indices at or
/// above `CPU_SET_CAPACITY` are rejected with `InvalidInput`.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    if cpu >= CPU_SET_CAPACITY {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cpu index {cpu} exceeds the affinity set size {CPU_SET_CAPACITY}"),
        ));
    }

    // SAFETY: the set is zero-initialized before use and only passed to
    // sched_setaffinity together with its exact size.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is a no-op on this platform
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
