//! Countdown scheduler
//!
//! Picks the soonest timer, decides what the display should show for it and
//! drives the display until no timers are left.

pub mod frames;
pub mod phase;
pub mod runner;

pub use frames::{countdown_frame, spinner_frame, GREETING_TEXT, SPINNER, SPLASH_TEXT};
pub use phase::Phase;
pub use runner::{flash_text, CountdownLoop, Tick};
