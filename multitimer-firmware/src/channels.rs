//! Inter-task communication channels
//!
//! Defines the statics shared between Embassy tasks: the gadget session,
//! the synced clock and the signals between the bridge link and the
//! display tasks.

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use multitimer_core::session::GadgetSession;
use multitimer_core::traits::SharedDisplay;
use multitimer_drivers::display::Ht16k33;

use crate::clock::SyncedClock;
use crate::config::TIMER_CAPACITY;

/// The display as wired on the board
pub type BoardDisplay = Ht16k33<I2c<'static, I2C0, Blocking>>;

/// Handle the countdown and greeting tasks draw through
pub type GadgetDisplay = SharedDisplay<'static, CriticalSectionRawMutex, BoardDisplay>;

/// Timer registry and countdown loop flag
pub static SESSION: GadgetSession<CriticalSectionRawMutex, TIMER_CAPACITY> = GadgetSession::new();

/// Epoch time as last reported by the bridge
pub static CLOCK: SyncedClock = SyncedClock::new();

/// Signal that a heartbeat (PING) was received from the bridge
pub static PONG_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Bridge reported a device connection; carries the device address
pub static GREETING: Signal<CriticalSectionRawMutex, [u8; 6]> = Signal::new();
