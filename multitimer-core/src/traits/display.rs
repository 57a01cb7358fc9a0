//! Segment display trait

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

/// Character positions on the display
pub const DIGITS: usize = 4;

/// Errors reported by a display driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the display failed
    Communication,
    /// Text longer than the display or decimal position out of range
    InvalidText,
}

/// One complete picture: up to four characters plus an optional lit decimal point
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    pub text: String<DIGITS>,
    pub decimal: Option<u8>,
}

impl DisplayFrame {
    /// Frame showing `text`, cut to [`DIGITS`] characters
    pub fn text(text: &str) -> Self {
        let mut frame = Self::default();
        for ch in text.chars() {
            if frame.text.push(ch).is_err() {
                break;
            }
        }
        frame
    }

    pub fn with_decimal(mut self, position: u8) -> Self {
        self.decimal = Some(position);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.decimal.is_none()
    }
}

/// Buffered four-character segment display
///
/// Drawing is `clear → print_text → [set_decimal] → show`; nothing is
/// visible until [`show`](SegmentDisplay::show) commits the buffer.
pub trait SegmentDisplay {
    /// Blank the buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write up to [`DIGITS`] characters into the buffer, left aligned
    fn print_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Light or blank the decimal point after character `position` (0-3)
    fn set_decimal(&mut self, position: u8, on: bool) -> Result<(), DisplayError>;

    /// Push the buffer to the physical display
    fn show(&mut self) -> Result<(), DisplayError>;

    /// Draw a whole frame
    fn draw(&mut self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        self.clear()?;
        self.print_text(&frame.text)?;
        if let Some(position) = frame.decimal {
            self.set_decimal(position, true)?;
        }
        self.show()
    }

    /// Blank the physical display
    fn blank(&mut self) -> Result<(), DisplayError> {
        self.clear()?;
        self.show()
    }
}

impl<T: SegmentDisplay + ?Sized> SegmentDisplay for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn print_text(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print_text(text)
    }

    fn set_decimal(&mut self, position: u8, on: bool) -> Result<(), DisplayError> {
        (**self).set_decimal(position, on)
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        (**self).show()
    }

    fn draw(&mut self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        (**self).draw(frame)
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        (**self).blank()
    }
}

/// A display shared between tasks through a blocking mutex
///
/// Whole frames are drawn under one lock so two writers never interleave
/// their `clear`/`print_text`/`show` sequences.
pub struct SharedDisplay<'a, M: RawMutex, D> {
    inner: &'a Mutex<M, RefCell<D>>,
}

impl<M: RawMutex, D> Clone for SharedDisplay<'_, M, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, D> Copy for SharedDisplay<'_, M, D> {}

impl<'a, M: RawMutex, D: SegmentDisplay> SharedDisplay<'a, M, D> {
    pub fn new(inner: &'a Mutex<M, RefCell<D>>) -> Self {
        Self { inner }
    }

    fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<M: RawMutex, D: SegmentDisplay> SegmentDisplay for SharedDisplay<'_, M, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.with(|d| d.clear())
    }

    fn print_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.with(|d| d.print_text(text))
    }

    fn set_decimal(&mut self, position: u8, on: bool) -> Result<(), DisplayError> {
        self.with(|d| d.set_decimal(position, on))
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.with(|d| d.show())
    }

    fn draw(&mut self, frame: &DisplayFrame) -> Result<(), DisplayError> {
        self.with(|d| d.draw(frame))
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        self.with(|d| d.blank())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// What a display received, one entry per committed frame
    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        pending: DisplayFrame,
        pub shown: std::vec::Vec<DisplayFrame>,
    }

    impl RecordingDisplay {
        pub fn texts(&self) -> std::vec::Vec<&str> {
            self.shown.iter().map(|f| f.text.as_str()).collect()
        }
    }

    impl SegmentDisplay for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.pending = DisplayFrame::default();
            Ok(())
        }

        fn print_text(&mut self, text: &str) -> Result<(), DisplayError> {
            if text.chars().count() > DIGITS {
                return Err(DisplayError::InvalidText);
            }
            self.pending.text = DisplayFrame::text(text).text;
            Ok(())
        }

        fn set_decimal(&mut self, position: u8, on: bool) -> Result<(), DisplayError> {
            if usize::from(position) >= DIGITS {
                return Err(DisplayError::InvalidText);
            }
            self.pending.decimal = on.then_some(position);
            Ok(())
        }

        fn show(&mut self) -> Result<(), DisplayError> {
            self.shown.push(self.pending.clone());
            Ok(())
        }
    }
}
