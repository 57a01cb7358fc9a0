//! Timer and slot types

use core::num::NonZeroU32;

/// A timer reported by the voice-assistant device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    /// Opaque identity; 0 is never a valid token
    pub token: NonZeroU32,
    /// Absolute expiry in epoch seconds
    pub expiry: i64,
}

impl Timer {
    /// Seconds until expiry at `now_s`; zero or negative once expired
    pub fn remaining(&self, now_s: i64) -> i64 {
        self.expiry.saturating_sub(now_s)
    }
}

/// One entry of the registry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Timer),
}

impl Slot {
    pub const EMPTY: Slot = Slot::Empty;

    /// Raw token, 0 for an empty slot
    pub fn token(&self) -> u32 {
        match self {
            Slot::Empty => 0,
            Slot::Occupied(timer) => timer.token.get(),
        }
    }

    /// Expiry, 0 for an empty slot
    pub fn expiry(&self) -> i64 {
        match self {
            Slot::Empty => 0,
            Slot::Occupied(timer) => timer.expiry,
        }
    }

    pub fn timer(&self) -> Option<&Timer> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(timer) => Some(timer),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub(crate) fn holds(&self, token: NonZeroU32) -> bool {
        matches!(self, Slot::Occupied(timer) if timer.token == token)
    }
}
