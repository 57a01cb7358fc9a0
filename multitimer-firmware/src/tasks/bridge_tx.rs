//! Bridge UART transmit task
//!
//! Answers heartbeats from the bridge host.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use multitimer_protocol::{GadgetMessage, MAX_FRAME_SIZE};

use crate::channels::PONG_REQUEST;

/// Bridge TX task - sends frames to the bridge
#[embassy_executor::task]
pub async fn bridge_tx_task(mut tx: BufferedUartTx) {
    info!("Bridge TX task started");

    loop {
        PONG_REQUEST.wait().await;
        send_message(&mut tx, GadgetMessage::Pong).await;
    }
}

async fn send_message(tx: &mut BufferedUartTx, msg: GadgetMessage) {
    let frame = msg.to_frame();
    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send {:?}: {:?}", msg, e);
            } else {
                trace!("{:?} sent", msg);
            }
        }
        Err(e) => warn!("Failed to encode {:?}: {:?}", msg, e),
    }
}
