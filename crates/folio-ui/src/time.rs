//! Time source for the rebuild debounce.

use std::time::Instant;

/// Supplies "now" to the coordinator.
///
/// Production code uses [`SystemClock`]; tests substitute a clock they can
/// advance by hand.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
