//! Frames shown on the four-character display

use core::fmt::Write;

use heapless::String;

use crate::traits::{DisplayFrame, DIGITS};

/// Spinner pattern for the expiry flourish, one frame per entry
pub const SPINNER: [&str; 4] = ["|/-\\", "/-\\|", "-\\|/", "\\|/-"];

/// Shown while the gadget boots
pub const SPLASH_TEXT: &str = "WAIT";

/// Shown when the bridge connects to a device
pub const GREETING_TEXT: &str = "HELO";

/// Decimal point lit between minutes and seconds
pub const COLON_POSITION: u8 = 1;

const MAX_MINUTES: i64 = 99;

/// `MMSS` with the colon point lit, for `remaining_s` seconds.
///
/// Anything past 99:59 shows as 99:59.
pub fn countdown_frame(remaining_s: i64) -> DisplayFrame {
    let remaining_s = remaining_s.clamp(0, MAX_MINUTES * 60 + 59);
    let minutes = remaining_s / 60;
    let seconds = remaining_s % 60;

    let mut text: String<DIGITS> = String::new();
    // Four digits always fit
    let _ = write!(text, "{:02}{:02}", minutes, seconds);

    DisplayFrame {
        text,
        decimal: Some(COLON_POSITION),
    }
}

/// Frame `step` of the spinner, wrapping around
pub fn spinner_frame(step: usize) -> DisplayFrame {
    DisplayFrame::text(SPINNER[step % SPINNER.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_padding() {
        let frame = countdown_frame(65);
        assert_eq!(frame.text.as_str(), "0105");
        assert_eq!(frame.decimal, Some(COLON_POSITION));

        assert_eq!(countdown_frame(3).text.as_str(), "0003");
        assert_eq!(countdown_frame(600).text.as_str(), "1000");
    }

    #[test]
    fn test_countdown_clamps_long_timers() {
        assert_eq!(countdown_frame(99 * 60 + 59).text.as_str(), "9959");
        assert_eq!(countdown_frame(3 * 3_600).text.as_str(), "9959");
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0).text.as_str(), "|/-\\");
        assert_eq!(spinner_frame(5).text.as_str(), "/-\\|");
        assert_eq!(spinner_frame(3).decimal, None);
    }
}
