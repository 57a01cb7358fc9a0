//! Configuration types
//!
//! Board-agnostic tuning for the countdown loop. The firmware fills these in
//! from `gadget.toml` at build time.

pub mod types;

pub use types::*;
