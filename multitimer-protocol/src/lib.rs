//! Bridge ↔ gadget directive protocol
//!
//! The gadget has no radio of its own. A bridge host keeps the session with
//! the voice-assistant device and forwards the alert directives it receives
//! over UART. This crate defines that link.
//!
//! # Protocol Overview
//!
//! Every message travels in one frame:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ SYNC  │ LENGTH │ KIND │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–128B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Payloads are postcard-encoded structs, see [`messages`].
//!
//! # Tokens
//!
//! The device names alerts with opaque string tokens; the gadget only stores
//! a `u32`. The bridge maps each device token to a non-zero `u32` and must
//! send the same value every time that device token appears again, so that a
//! repeated SetAlert updates its timer and a DeleteAlert finds it.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_SYNC, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, Connected, DeleteAlert, GadgetMessage, SetAlert, TimeSync};
