//! Timer registry
//!
//! Fixed-size table of active timers keyed by token.

pub mod slot;
pub mod table;

pub use slot::{Slot, Timer};
pub use table::{TimerRegistry, Upsert, DEFAULT_CAPACITY};
