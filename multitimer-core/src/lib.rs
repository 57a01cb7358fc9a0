//! Board-agnostic core logic for the multitimer gadget
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Timer registry (fixed table of active timers)
//! - Gadget session (registry plus loop flag behind one mutex)
//! - Countdown scheduler loop
//! - Alert directive ingress and timestamp parsing
//! - Display and clock traits
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod ingress;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod timestamp;
pub mod traits;

pub use error::AlertError;
