//! Wall clock for the countdown
//!
//! The RP2040 has no battery-backed clock, so epoch time is learned from the
//! bridge's TIME_SYNC message and advanced with the embassy monotonic timer.

use embassy_time::Instant;
use multitimer_core::traits::WallClock;
use portable_atomic::{AtomicBool, AtomicI64, Ordering};

/// Epoch seconds derived from uptime plus a synced offset
pub struct SyncedClock {
    /// Epoch second at which uptime was zero
    boot_epoch_s: AtomicI64,
    synced: AtomicBool,
}

impl SyncedClock {
    pub const fn new() -> Self {
        Self {
            boot_epoch_s: AtomicI64::new(0),
            synced: AtomicBool::new(false),
        }
    }

    /// Adopt the bridge's wall clock. Returns the correction applied.
    pub fn sync(&self, epoch_s: i64) -> i64 {
        let boot_epoch_s = epoch_s - uptime_s();
        let previous = self.boot_epoch_s.swap(boot_epoch_s, Ordering::Relaxed);
        let first = !self.synced.swap(true, Ordering::Relaxed);
        if first {
            0
        } else {
            boot_epoch_s - previous
        }
    }

    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Relaxed)
    }
}

impl WallClock for SyncedClock {
    fn now_s(&self) -> i64 {
        self.boot_epoch_s.load(Ordering::Relaxed) + uptime_s()
    }
}

fn uptime_s() -> i64 {
    Instant::now().as_secs() as i64
}
