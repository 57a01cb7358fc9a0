//! Alert handling errors
//!
//! None of these are fatal. The caller logs them and the request is dropped.

/// Reasons a directive or registry operation did not take effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertError {
    /// Token 0 is reserved for empty slots
    InvalidToken,
    /// Every slot is occupied; the timer was not added
    CapacityExceeded,
    /// No slot holds the requested token
    NotFound,
    /// The scheduled time is not a timestamp we understand
    TimestampUnparseable,
    /// The scheduled time is already in the past
    AlreadyElapsed,
}

impl AlertError {
    /// Short label for logs and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertError::InvalidToken => "invalid token",
            AlertError::CapacityExceeded => "no free timer slot",
            AlertError::NotFound => "unknown token",
            AlertError::TimestampUnparseable => "unparseable timestamp",
            AlertError::AlreadyElapsed => "already elapsed",
        }
    }
}

impl core::fmt::Display for AlertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
