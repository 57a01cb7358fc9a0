//! Configuration type definitions

/// Timing of the countdown loop and the cosmetic animations
///
/// Defaults: half-second refresh, one-second flourish, timers dropped ten
/// seconds after expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GadgetConfig {
    /// Pause between countdown redraws (ms)
    pub refresh_ms: u32,
    /// How long each spinner frame stays up (µs)
    pub flourish_frame_us: u32,
    /// Passes over the spinner pattern per flourish
    pub flourish_cycles: u8,
    /// Seconds past expiry after which a timer is dropped automatically
    pub stale_after_s: i64,
    /// How long the connection greeting stays up (ms)
    pub greeting_ms: u32,
    /// How long the boot splash stays up (ms)
    pub splash_ms: u32,
}

impl GadgetConfig {
    pub const DEFAULT: Self = Self {
        refresh_ms: 500,
        flourish_frame_us: 62_500,
        flourish_cycles: 4,
        stale_after_s: 10,
        greeting_ms: 2_000,
        splash_ms: 1_000,
    };
}

impl Default for GadgetConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
