//! Link framing
//!
//! `0xAA`, a length byte (0-128), a kind byte, the payload, then one check
//! byte that XORs the length, the kind and each payload byte together.

use heapless::Vec;

/// First byte of every frame
pub const FRAME_SYNC: u8 = 0xAA;

/// Largest payload a frame may carry.
///
/// A `SetAlert` with a long opaque timestamp still fits comfortably.
pub const MAX_PAYLOAD_SIZE: usize = 128;

/// SYNC + LENGTH + KIND + payload + CHECKSUM
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

/// Errors raised while framing or decoding messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Check byte did not match the received bytes
    InvalidChecksum,
    /// Structurally valid frame with an unknown kind or wrong payload shape
    InvalidFrame,
    /// Output buffer too small
    BufferTooSmall,
    /// Payload could not be decoded into the expected message
    Decode,
    /// Message could not be serialized into a payload
    Encode,
}

/// One frame, either received or about to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind identifier
    pub kind: u8,
    /// Raw payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame, copying `payload`
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Build a frame that carries no payload
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ kind, |acc, &b| acc ^ b)
    }

    /// Number of bytes [`Frame::encode`] will write
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 4
    }

    /// Encode this frame into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let total = self.encoded_len();
        let out = buffer.get_mut(..total).ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let body_end = 3 + self.payload.len();
        out[0] = FRAME_SYNC;
        out[1] = length;
        out[2] = self.kind;
        out[3..body_end].copy_from_slice(&self.payload);
        out[body_end] = Self::checksum(length, self.kind, &self.payload);

        Ok(total)
    }

    /// Owned copy of the wire bytes
    pub fn to_bytes(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Incremental decoder for the UART byte stream
///
/// Anything before a `0xAA` is discarded. A bad length or check byte drops
/// the frame in progress and hunting for `0xAA` starts again.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: u8,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Forget the frame in progress
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.kind = 0;
        self.payload.clear();
    }

    /// Advance the decoder by `byte`
    ///
    /// Yields a frame on its check byte. Errors leave the decoder hunting
    /// for `0xAA`, so the caller can keep feeding.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_SYNC {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.length = byte;
                self.stage = Stage::Kind;
            }
            Stage::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Length was bounded in Stage::Length, so this cannot overflow
                let _ = self.payload.push(byte);
                if self.payload.len() == usize::from(self.length) {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = Frame::checksum(self.length, self.kind, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Advance through `bytes`, stopping after the first frame
    ///
    /// The count is how far into `bytes` decoding got; bytes past it belong
    /// to the next call.
    pub fn feed_slice(&mut self, bytes: &[u8]) -> Result<(Option<Frame>, usize), FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.feed(byte)? {
                return Ok((Some(frame), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_frame_layout() {
        let frame = Frame::empty(0x24);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_SYNC, 0, 0x24, 0x24]);
    }

    #[test]
    fn test_payload_checksum() {
        let frame = Frame::new(0x11, &[0x01, 0x02, 0x04]).unwrap();
        let bytes = frame.to_bytes().unwrap();

        assert_eq!(bytes.len(), 7);
        assert_eq!(bytes[1], 3);
        assert_eq!(bytes[6], 3 ^ 0x11 ^ 0x01 ^ 0x02 ^ 0x04);
    }

    #[test]
    fn test_encode_into_short_buffer() {
        let frame = Frame::new(0x10, &[0u8; 10]).unwrap();
        let mut buffer = [0u8; 13];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_corrupt_checksum_resets() {
        let mut bytes = Frame::new(0x11, &[7]).unwrap().to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x55;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_slice(&bytes), Err(FrameError::InvalidChecksum));

        // The next good frame still gets through
        let good = Frame::empty(0x02).to_bytes().unwrap();
        let (frame, _) = parser.feed_slice(&good).unwrap();
        assert_eq!(frame.unwrap().kind, 0x02);
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut parser = FrameParser::new();
        parser.feed(FRAME_SYNC).unwrap();
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_two_frames_back_to_back() {
        let mut stream: Vec<u8, 32> = Vec::new();
        stream
            .extend_from_slice(&Frame::empty(0x02).to_bytes().unwrap())
            .unwrap();
        stream
            .extend_from_slice(&Frame::new(0x11, &[9]).unwrap().to_bytes().unwrap())
            .unwrap();

        let mut parser = FrameParser::new();
        let (first, used) = parser.feed_slice(&stream).unwrap();
        assert_eq!(first.unwrap().kind, 0x02);
        assert_eq!(used, 4);

        let (second, _) = parser.feed_slice(&stream[used..]).unwrap();
        let second = second.unwrap();
        assert_eq!(second.kind, 0x11);
        assert_eq!(&second.payload[..], &[9]);
    }

    proptest! {
        #[test]
        fn prop_frame_survives_leading_noise(
            noise in proptest::collection::vec(any::<u8>().prop_filter("not sync", |b| *b != FRAME_SYNC), 0..32),
            kind in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(kind, &payload).unwrap();
            let encoded = frame.to_bytes().unwrap();

            let mut parser = FrameParser::new();
            for byte in noise {
                prop_assert_eq!(parser.feed(byte), Ok(None));
            }
            let (parsed, used) = parser.feed_slice(&encoded).unwrap();
            prop_assert_eq!(parsed, Some(frame));
            prop_assert_eq!(used, encoded.len());
        }

        #[test]
        fn prop_parser_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut parser = FrameParser::new();
            for byte in bytes {
                let _ = parser.feed(byte);
            }
        }
    }
}
