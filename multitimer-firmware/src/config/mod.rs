//! Build-time configuration
//!
//! `build.rs` validates `gadget.toml` and turns it into the constants below.

use multitimer_core::config::GadgetConfig;
use multitimer_drivers::display::Ht16k33Config;

include!(concat!(env!("OUT_DIR"), "/gadget_config.rs"));
