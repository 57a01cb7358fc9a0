//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod bridge_rx;
pub mod bridge_tx;
pub mod countdown;
pub mod greeting;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
pub use countdown::countdown_task;
pub use greeting::greeting_task;
