//! Multitimer - countdown gadget firmware
//!
//! Main firmware binary for RP2040 boards driving an HT16K33 four-character
//! display. Timers arrive from the bridge host over UART; the soonest one is
//! counted down on the display.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use multitimer_core::scheduler::{flash_text, SPLASH_TEXT};
use multitimer_core::traits::SharedDisplay;
use multitimer_drivers::display::Ht16k33;

use crate::channels::BoardDisplay;
use crate::config::{BRIDGE_BAUDRATE, DISPLAY_CONFIG, GADGET_CONFIG, TIMER_CAPACITY};

mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Display shared by the countdown and greeting tasks
static DISPLAY: StaticCell<Mutex<CriticalSectionRawMutex, RefCell<BoardDisplay>>> =
    StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Multitimer firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");
    info!(
        "Config: {} timer slots, refresh {}ms, stale after {}s",
        TIMER_CAPACITY, GADGET_CONFIG.refresh_ms, GADGET_CONFIG.stale_after_s
    );

    // Display on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut ht16k33 = Ht16k33::new(i2c, DISPLAY_CONFIG);
    match ht16k33.init() {
        Ok(()) => info!("HT16K33 initialized at {:#x}", DISPLAY_CONFIG.address),
        Err(e) => warn!("HT16K33 init failed: {:?}, continuing without display", e),
    }

    let mut display = SharedDisplay::new(DISPLAY.init(Mutex::new(RefCell::new(ht16k33))));

    // Boot splash, before any directive can arrive
    flash_text(&mut display, &mut Delay, SPLASH_TEXT, GADGET_CONFIG.splash_ms).await;

    // Setup UART for the bridge link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BRIDGE_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for bridge communication");

    spawner.spawn(tasks::bridge_rx_task(rx)).unwrap();
    spawner.spawn(tasks::bridge_tx_task(tx)).unwrap();
    spawner.spawn(tasks::countdown_task(display)).unwrap();
    spawner.spawn(tasks::greeting_task(display)).unwrap();

    info!("All tasks spawned, waiting for timers");
}
