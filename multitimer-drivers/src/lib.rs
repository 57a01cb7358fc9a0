//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in multitimer-core:
//!
//! - HT16K33 fourteen-segment alphanumeric display (I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
