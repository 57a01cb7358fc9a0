//! Message types carried inside frames
//!
//! - Bridge → gadget: alert directives, session and clock updates, heartbeat
//! - Gadget → bridge: heartbeat responses
//!
//! Payloads are postcard-encoded so string fields borrow straight out of the
//! received frame.

use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message kinds: bridge → gadget
pub const MSG_PING: u8 = 0x02;
pub const MSG_SET_ALERT: u8 = 0x10;
pub const MSG_DELETE_ALERT: u8 = 0x11;
pub const MSG_CONNECTED: u8 = 0x12;
pub const MSG_TIME_SYNC: u8 = 0x13;

// Message kinds: gadget → bridge
pub const MSG_PONG: u8 = 0x24;

/// An alert was set or updated on the voice-assistant device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAlert<'a> {
    /// Bridge-assigned identity, never 0, stable per device token
    pub token: u32,
    /// Alert kind tag as sent by the device ("TIMER", "ALARM", "REMINDER")
    pub kind: &'a str,
    /// ISO-8601 timestamp at which the alert fires
    pub scheduled_time: &'a str,
}

/// An alert was cancelled or dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeleteAlert {
    pub token: u32,
}

/// The bridge established a session with a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Connected {
    /// Bluetooth address of the device
    pub address: [u8; 6],
}

/// Current wall-clock time on the bridge host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSync {
    /// Seconds since the Unix epoch
    pub epoch_s: i64,
}

/// Messages received from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMessage<'a> {
    Ping,
    SetAlert(SetAlert<'a>),
    DeleteAlert(DeleteAlert),
    Connected(Connected),
    TimeSync(TimeSync),
}

fn decode<'a, T: Deserialize<'a>>(payload: &'a [u8]) -> Result<T, FrameError> {
    postcard::from_bytes(payload).map_err(|_| FrameError::Decode)
}

fn encode<T: Serialize>(kind: u8, value: &T) -> Result<Frame, FrameError> {
    let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(value, &mut buffer).map_err(|_| FrameError::Encode)?;
    Frame::new(kind, used)
}

impl<'a> BridgeMessage<'a> {
    /// Decode a message, borrowing string fields from `frame`
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.kind {
            MSG_PING => Ok(BridgeMessage::Ping),
            MSG_SET_ALERT => decode(payload).map(BridgeMessage::SetAlert),
            MSG_DELETE_ALERT => decode(payload).map(BridgeMessage::DeleteAlert),
            MSG_CONNECTED => decode(payload).map(BridgeMessage::Connected),
            MSG_TIME_SYNC => decode(payload).map(BridgeMessage::TimeSync),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode into a frame (used by the bridge side and in tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Ping => Ok(Frame::empty(MSG_PING)),
            BridgeMessage::SetAlert(msg) => encode(MSG_SET_ALERT, msg),
            BridgeMessage::DeleteAlert(msg) => encode(MSG_DELETE_ALERT, msg),
            BridgeMessage::Connected(msg) => encode(MSG_CONNECTED, msg),
            BridgeMessage::TimeSync(msg) => encode(MSG_TIME_SYNC, msg),
        }
    }
}

/// Messages sent back to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GadgetMessage {
    /// Heartbeat response
    Pong,
}

impl GadgetMessage {
    pub fn to_frame(&self) -> Frame {
        match self {
            GadgetMessage::Pong => Frame::empty(MSG_PONG),
        }
    }

    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_PONG => Ok(GadgetMessage::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SetAlert<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SetAlert {{ token: {}, kind: {=str}, scheduled_time: {=str} }}",
            self.token,
            self.kind,
            self.scheduled_time
        );
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BridgeMessage<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BridgeMessage::Ping => defmt::write!(f, "Ping"),
            BridgeMessage::SetAlert(msg) => defmt::write!(f, "{}", msg),
            BridgeMessage::DeleteAlert(msg) => defmt::write!(f, "{}", msg),
            BridgeMessage::Connected(msg) => defmt::write!(f, "{}", msg),
            BridgeMessage::TimeSync(msg) => defmt::write!(f, "{}", msg),
        }
    }
}
