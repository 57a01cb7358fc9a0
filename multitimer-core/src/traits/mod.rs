//! Collaborator traits
//!
//! These traits define the interface between the countdown logic and the
//! board: the segment display it renders to and the wall clock it counts
//! against. Sleeping goes through `embedded_hal_async::delay::DelayNs`.

pub mod clock;
pub mod display;

pub use clock::WallClock;
pub use display::{DisplayError, DisplayFrame, SegmentDisplay, SharedDisplay, DIGITS};
