//! Wall clock trait

/// Source of "current epoch seconds"
///
/// Used both to reject directives scheduled in the past and to compute the
/// remaining time of the soonest timer. Must be on the same clock as the
/// timestamps the voice-assistant device sends.
pub trait WallClock {
    /// Seconds since the Unix epoch
    fn now_s(&self) -> i64;
}

impl<T: WallClock + ?Sized> WallClock for &T {
    fn now_s(&self) -> i64 {
        (**self).now_s()
    }
}
