//! Connection greeting task

use defmt::*;
use embassy_time::Delay;

use multitimer_core::scheduler::{flash_text, GREETING_TEXT};

use crate::channels::{GadgetDisplay, GREETING};
use crate::config::GADGET_CONFIG;

/// Shows the greeting whenever the bridge reports a connection
#[embassy_executor::task]
pub async fn greeting_task(mut display: GadgetDisplay) {
    info!("Greeting task started");

    loop {
        let address = GREETING.wait().await;
        debug!("Greeting {:02x}", address);
        flash_text(&mut display, &mut Delay, GREETING_TEXT, GADGET_CONFIG.greeting_ms).await;
    }
}
