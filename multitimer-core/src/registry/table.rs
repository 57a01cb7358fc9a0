//! Fixed-capacity timer table
//!
//! A plain array scanned linearly; every operation is allocation-free and
//! bounded by the slot count.

use core::num::NonZeroU32;

use super::slot::{Slot, Timer};
use crate::error::AlertError;

/// Default number of timer slots
pub const DEFAULT_CAPACITY: usize = 8;

/// What an accepted [`TimerRegistry::upsert`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Upsert {
    /// Token was new and took slot `index`
    Inserted { index: usize },
    /// Token already lived in slot `index`; its expiry was replaced
    Updated { index: usize },
}

/// Table of active timers
///
/// Invariants:
/// - at most one occupied slot per token
/// - `max_expiry_seen` never decreases and is at least every stored expiry
#[derive(Debug, Clone)]
pub struct TimerRegistry<const N: usize = DEFAULT_CAPACITY> {
    slots: [Slot; N],
    max_expiry_seen: i64,
}

impl<const N: usize> Default for TimerRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TimerRegistry<N> {
    pub const fn new() -> Self {
        Self {
            slots: [Slot::EMPTY; N],
            max_expiry_seen: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    /// Highest `expiry + 1` ever accepted, saturating; kept for diagnostics
    pub fn max_expiry_seen(&self) -> i64 {
        self.max_expiry_seen
    }

    /// Raw slot view, in slot order
    pub fn slots(&self) -> &[Slot; N] {
        &self.slots
    }

    /// Occupied timers in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Timer> + '_ {
        self.slots.iter().filter_map(Slot::timer)
    }

    pub fn contains(&self, token: u32) -> bool {
        NonZeroU32::new(token).is_some_and(|t| self.slots.iter().any(|s| s.holds(t)))
    }

    /// Add a timer or move an existing one to a new expiry.
    ///
    /// A full table leaves every slot untouched and reports
    /// [`AlertError::CapacityExceeded`].
    pub fn upsert(&mut self, token: u32, expiry: i64) -> Result<Upsert, AlertError> {
        let token = NonZeroU32::new(token).ok_or(AlertError::InvalidToken)?;
        self.max_expiry_seen = self.max_expiry_seen.max(expiry.saturating_add(1));

        let timer = Timer { token, expiry };
        if let Some(index) = self.slots.iter().position(|s| s.holds(token)) {
            self.slots[index] = Slot::Occupied(timer);
            return Ok(Upsert::Updated { index });
        }

        let index = self
            .slots
            .iter()
            .position(Slot::is_empty)
            .ok_or(AlertError::CapacityExceeded)?;
        self.slots[index] = Slot::Occupied(timer);
        Ok(Upsert::Inserted { index })
    }

    /// Clear every slot holding `token`, returning how many were cleared
    pub fn remove(&mut self, token: u32) -> Result<usize, AlertError> {
        let token = NonZeroU32::new(token).ok_or(AlertError::NotFound)?;

        let mut cleared = 0;
        for slot in self.slots.iter_mut().filter(|s| s.holds(token)) {
            *slot = Slot::Empty;
            cleared += 1;
        }

        if cleared == 0 {
            Err(AlertError::NotFound)
        } else {
            Ok(cleared)
        }
    }

    /// Timer with the smallest expiry; the earliest slot wins ties
    pub fn find_soonest(&self) -> Option<Timer> {
        self.iter().min_by_key(|t| t.expiry).copied()
    }
}
