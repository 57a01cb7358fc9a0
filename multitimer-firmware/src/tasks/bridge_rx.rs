//! Bridge UART receive task
//!
//! Receives frames from the bridge host and applies the directives they carry.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_io_async::Read;

use multitimer_core::ingress::{AlertIngress, Outcome};
use multitimer_protocol::{BridgeMessage, FrameParser};

use crate::channels::{CLOCK, GREETING, PONG_REQUEST, SESSION};
use crate::clock::SyncedClock;
use crate::config::TIMER_CAPACITY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

type Ingress = AlertIngress<'static, CriticalSectionRawMutex, TIMER_CAPACITY, &'static SyncedClock>;

/// Bridge RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx) {
    info!("Bridge RX task started");

    let ingress: Ingress = AlertIngress::new(&SESSION, &CLOCK);
    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeMessage::from_frame(&frame) {
                            Ok(msg) => handle_message(&ingress, msg),
                            Err(e) => {
                                warn!("Failed to decode bridge message: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a decoded bridge message
fn handle_message(ingress: &Ingress, msg: BridgeMessage<'_>) {
    match msg {
        BridgeMessage::Ping => {
            trace!("PING received");
            PONG_REQUEST.signal(());
        }
        BridgeMessage::SetAlert(alert) => {
            if !CLOCK.is_synced() {
                warn!("SetAlert before time sync, clock reads uptime");
            }
            match ingress.set_alert(&alert) {
                Ok(Outcome::Scheduled {
                    token,
                    expiry,
                    upsert,
                    loop_started,
                }) => {
                    info!(
                        "Timer {} set for {} ({:?}), loop started: {}",
                        token, expiry, upsert, loop_started
                    );
                    log_active();
                }
                Ok(Outcome::IgnoredNonTimer) => {
                    debug!("Ignoring {=str} alert {}", alert.kind, alert.token);
                }
                Ok(outcome) => {
                    debug!("SetAlert: {:?}", outcome);
                }
                Err(e) => {
                    warn!("SetAlert {} rejected: {:?}", alert.token, e);
                }
            }
        }
        BridgeMessage::DeleteAlert(alert) => {
            if let Outcome::Removed { token, cleared } = ingress.delete_alert(&alert) {
                if cleared > 0 {
                    info!("Timer {} deleted", token);
                } else {
                    debug!("DeleteAlert for unknown timer {}", token);
                }
            }
        }
        BridgeMessage::Connected(connected) => {
            info!("Bridge connected to device {:02x}", connected.address);
            GREETING.signal(connected.address);
        }
        BridgeMessage::TimeSync(sync) => {
            let correction = CLOCK.sync(sync.epoch_s);
            info!("Clock synced to {} (corrected by {}s)", sync.epoch_s, correction);
        }
    }
}

/// Dump the occupied timer slots
fn log_active() {
    for timer in SESSION.snapshot().iter() {
        debug!("  timer {} expires at {}", timer.token.get(), timer.expiry);
    }
}
