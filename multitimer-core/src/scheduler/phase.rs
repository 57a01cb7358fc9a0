//! Display phase of the soonest timer

/// What the display is doing for a timer with `remaining` seconds left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Still running; show the time left
    Counting { remaining_s: i64 },
    /// Just expired; play the flourish
    Expiring { overdue_s: i64 },
    /// Expired long ago and nobody deleted it; drop it
    Stale,
}

impl Phase {
    /// Classify `remaining_s` against the stale window.
    ///
    /// `remaining > 0` counts, `-stale_after < remaining <= 0` flourishes,
    /// `remaining <= -stale_after` is stale.
    pub fn classify(remaining_s: i64, stale_after_s: i64) -> Self {
        if remaining_s > 0 {
            Phase::Counting { remaining_s }
        } else if remaining_s <= -stale_after_s {
            Phase::Stale
        } else {
            Phase::Expiring {
                overdue_s: -remaining_s,
            }
        }
    }
}
