//! HT16K33 fourteen-segment display driver (I2C)
//!
//! The HT16K33 is an LED matrix controller used on the common four-character
//! alphanumeric backpacks. Each character is one 16-bit row of display RAM.
//!
//! # I2C Protocol
//!
//! - Address: 0x70 (0x70-0x77 via the A0-A2 jumpers)
//! - Command bytes: system setup, display setup, dimming
//! - RAM write: start address 0x00 followed by two bytes (LE) per character
//!
//! Drawing is buffered; nothing reaches the bus until `show`.

use embedded_hal::i2c::I2c;
use multitimer_core::traits::{DisplayError, SegmentDisplay, DIGITS};

use super::font::{glyph, DP};

/// Command bytes
pub mod cmd {
    /// System setup, oscillator on
    pub const OSCILLATOR_ON: u8 = 0x21;
    /// Display setup, display on, blink off
    pub const DISPLAY_ON: u8 = 0x81;
    /// Dimming set, OR with 0-15
    pub const BRIGHTNESS: u8 = 0xE0;
    /// Display RAM start address
    pub const RAM_START: u8 = 0x00;
}

/// Default bus address with no jumpers bridged
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Maximum dimming level
pub const MAX_BRIGHTNESS: u8 = 15;

/// HT16K33 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ht16k33Config {
    /// 7-bit I2C address (0x70-0x77)
    pub address: u8,
    /// Dimming level (0-15)
    pub brightness: u8,
}

impl Default for Ht16k33Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

/// HT16K33 alphanumeric display
pub struct Ht16k33<I> {
    i2c: I,
    config: Ht16k33Config,
    buffer: [u16; DIGITS],
}

impl<I: I2c> Ht16k33<I> {
    /// Create a driver. Call [`init`](Self::init) before drawing.
    pub fn new(i2c: I, config: Ht16k33Config) -> Self {
        Self {
            i2c,
            config,
            buffer: [0; DIGITS],
        }
    }

    /// Start the oscillator, switch the display on and set the brightness
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::OSCILLATOR_ON)?;
        self.command(cmd::DISPLAY_ON)?;
        self.set_brightness(self.config.brightness)
    }

    /// Set the dimming level, clamped to 0-15
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.config.brightness = level.min(MAX_BRIGHTNESS);
        self.command(cmd::BRIGHTNESS | self.config.brightness)
    }

    /// Current RAM image, one row per character
    pub fn buffer(&self) -> &[u16; DIGITS] {
        &self.buffer
    }

    /// Give back the bus
    pub fn release(self) -> I {
        self.i2c
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.config.address, &[byte])
            .map_err(|_| DisplayError::Communication)
    }
}

/// Build the RAM write for a buffer: start address then each row little-endian
fn ram_write(buffer: &[u16; DIGITS]) -> [u8; 1 + DIGITS * 2] {
    let mut bytes = [0u8; 1 + DIGITS * 2];
    bytes[0] = cmd::RAM_START;
    for (i, row) in buffer.iter().enumerate() {
        let [lo, hi] = row.to_le_bytes();
        bytes[1 + i * 2] = lo;
        bytes[2 + i * 2] = hi;
    }
    bytes
}

impl<I: I2c> SegmentDisplay for Ht16k33<I> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer = [0; DIGITS];
        Ok(())
    }

    fn print_text(&mut self, text: &str) -> Result<(), DisplayError> {
        if text.chars().count() > DIGITS {
            return Err(DisplayError::InvalidText);
        }
        for (row, ch) in self.buffer.iter_mut().zip(text.chars()) {
            *row = (*row & DP) | glyph(ch);
        }
        Ok(())
    }

    fn set_decimal(&mut self, position: u8, on: bool) -> Result<(), DisplayError> {
        let row = self
            .buffer
            .get_mut(usize::from(position))
            .ok_or(DisplayError::InvalidText)?;
        if on {
            *row |= DP;
        } else {
            *row &= !DP;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        let bytes = ram_write(&self.buffer);
        self.i2c
            .write(self.config.address, &bytes)
            .map_err(|_| DisplayError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use multitimer_core::scheduler::{countdown_frame, spinner_frame};
    use multitimer_core::traits::DisplayFrame;

    /// Records every write; fails all transfers when `fail` is set
    #[derive(Default)]
    struct MockBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut display = Ht16k33::new(
            MockBus::default(),
            Ht16k33Config {
                address: 0x71,
                brightness: 8,
            },
        );
        display.init().unwrap();

        let bus = display.release();
        assert_eq!(
            bus.writes,
            [
                (0x71, vec![0x21]),
                (0x71, vec![0x81]),
                (0x71, vec![0xE8]),
            ]
        );
    }

    #[test]
    fn test_brightness_clamped() {
        let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
        display.set_brightness(200).unwrap();
        assert_eq!(display.release().writes, [(0x70, vec![0xEF])]);
    }

    #[test]
    fn test_countdown_frame_ram_image() {
        let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
        display.draw(&countdown_frame(65)).unwrap();

        // "0105" with the point after the second digit
        assert_eq!(
            display.buffer(),
            &[glyph('0'), glyph('1') | DP, glyph('0'), glyph('5')]
        );

        let bus = display.release();
        assert_eq!(bus.writes.len(), 1);
        let (address, bytes) = &bus.writes[0];
        assert_eq!(*address, DEFAULT_ADDRESS);
        assert_eq!(
            bytes,
            &[0x00, 0x3F, 0x0C, 0x06, 0x40, 0x3F, 0x0C, 0x69, 0x20]
        );
    }

    #[test]
    fn test_draw_replaces_previous_frame() {
        let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
        display.draw(&countdown_frame(65)).unwrap();
        display.draw(&spinner_frame(0)).unwrap();

        assert_eq!(
            display.buffer(),
            &[glyph('|'), glyph('/'), glyph('-'), glyph('\\')]
        );

        display.blank().unwrap();
        assert_eq!(display.buffer(), &[0; DIGITS]);
        let bus = display.release();
        assert_eq!(bus.writes[2].1, [0u8; 9]);
    }

    #[test]
    fn test_short_text_left_aligned() {
        let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
        display.draw(&DisplayFrame::text("HI")).unwrap();
        assert_eq!(display.buffer(), &[glyph('H'), glyph('I'), 0, 0]);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
        assert_eq!(display.print_text("HELLO"), Err(DisplayError::InvalidText));
        assert_eq!(display.set_decimal(4, true), Err(DisplayError::InvalidText));

        display.set_decimal(3, true).unwrap();
        display.set_decimal(3, false).unwrap();
        assert_eq!(display.buffer()[3], 0);
    }

    #[test]
    fn test_bus_error_reported() {
        let mut display = Ht16k33::new(
            MockBus {
                fail: true,
                ..Default::default()
            },
            Ht16k33Config::default(),
        );
        assert_eq!(display.init(), Err(DisplayError::Communication));
        assert_eq!(display.blank(), Err(DisplayError::Communication));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_print_never_touches_decimal(text in "[ -~]{0,4}", position in 0u8..4) {
                let mut display = Ht16k33::new(MockBus::default(), Ht16k33Config::default());
                display.set_decimal(position, true).unwrap();
                display.print_text(&text).unwrap();
                for (i, row) in display.buffer().iter().enumerate() {
                    prop_assert_eq!(row & DP != 0, i == usize::from(position));
                }
            }
        }
    }
}
