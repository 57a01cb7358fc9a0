//! Gadget session
//!
//! Owns the timer registry and the "countdown loop is running" flag behind a
//! single blocking mutex. Every registry read or write, from ingress or from
//! the loop itself, goes through here, and no reference into the table ever
//! leaves a lock closure.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use heapless::Vec;

use crate::error::AlertError;
use crate::registry::{Timer, TimerRegistry, Upsert, DEFAULT_CAPACITY};

/// Whether a countdown loop instance is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    NotRunning,
    Running,
}

/// Result of [`GadgetSession::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduled {
    pub upsert: Upsert,
    /// This call moved the loop from `NotRunning` to `Running`
    pub loop_started: bool,
}

struct SessionState<const N: usize> {
    registry: TimerRegistry<N>,
    loop_state: LoopState,
}

/// Shared state between alert ingress and the countdown loop
pub struct GadgetSession<M: RawMutex, const N: usize = DEFAULT_CAPACITY> {
    state: Mutex<M, RefCell<SessionState<N>>>,
    wake: Signal<M, ()>,
}

impl<M: RawMutex, const N: usize> Default for GadgetSession<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> GadgetSession<M, N> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(SessionState {
                registry: TimerRegistry::new(),
                loop_state: LoopState::NotRunning,
            })),
            wake: Signal::new(),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut SessionState<N>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Add or update a timer and make sure a loop will pick it up.
    ///
    /// Both happen in one critical section, so a loop that is just about to
    /// finish either sees the new timer or has already released the flag and
    /// gets restarted.
    pub fn schedule(&self, token: u32, expiry: i64) -> Result<Scheduled, AlertError> {
        let scheduled = self.with(|state| -> Result<Scheduled, AlertError> {
            let upsert = state.registry.upsert(token, expiry)?;
            let loop_started = state.loop_state == LoopState::NotRunning;
            state.loop_state = LoopState::Running;
            Ok(Scheduled {
                upsert,
                loop_started,
            })
        })?;

        if scheduled.loop_started {
            self.wake.signal(());
        }
        Ok(scheduled)
    }

    pub fn remove(&self, token: u32) -> Result<usize, AlertError> {
        self.with(|state| state.registry.remove(token))
    }

    pub fn find_soonest(&self) -> Option<Timer> {
        self.with(|state| state.registry.find_soonest())
    }

    pub fn len(&self) -> usize {
        self.with(|state| state.registry.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with(|state| state.registry.is_empty())
    }

    pub fn contains(&self, token: u32) -> bool {
        self.with(|state| state.registry.contains(token))
    }

    /// Copy of the occupied timers in slot order, for diagnostics
    pub fn snapshot(&self) -> Vec<Timer, N> {
        self.with(|state| state.registry.iter().copied().collect())
    }

    pub fn loop_state(&self) -> LoopState {
        self.with(|state| state.loop_state)
    }

    /// Wait until ingress asks for a loop instance
    pub async fn wait_for_start(&self) {
        self.wake.wait().await
    }

    /// Soonest timer, or release the running flag when the table is empty.
    ///
    /// Called only by the loop; the emptiness check and the release are one
    /// critical section.
    pub fn next_or_finish(&self) -> Option<Timer> {
        self.with(|state| {
            let soonest = state.registry.find_soonest();
            if soonest.is_none() {
                state.loop_state = LoopState::NotRunning;
            }
            soonest
        })
    }
}
