//! Countdown task
//!
//! Parks until ingress asks for a loop, then runs the countdown until no
//! timers are left.

use defmt::*;
use embassy_time::Delay;

use multitimer_core::scheduler::{CountdownLoop, Tick};

use crate::channels::{GadgetDisplay, CLOCK, SESSION};
use crate::config::GADGET_CONFIG;

#[embassy_executor::task]
pub async fn countdown_task(display: GadgetDisplay) {
    info!("Countdown task started");

    let mut countdown = CountdownLoop::new(&SESSION, display, &CLOCK, Delay, GADGET_CONFIG);

    loop {
        SESSION.wait_for_start().await;
        info!("Countdown loop running");
        countdown.run(log_tick).await;
        info!("Countdown loop stopped, no timers left");
    }
}

fn log_tick(tick: &Tick) {
    match *tick {
        Tick::Countdown { token, remaining_s } => {
            trace!("Timer {}: {}s left", token, remaining_s);
        }
        Tick::Flourish { token, overdue_s } => {
            debug!("Timer {} alerting, {}s past expiry", token, overdue_s);
        }
        Tick::Evicted { token } => {
            info!("Timer {} dropped, expired and never deleted", token);
        }
        Tick::Finished => {}
    }
}
