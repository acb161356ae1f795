//! Sailing ID structure: `LLL-DD-HH`
//!
//! The three letters name the departure terminal, `DD` is the day of
//! departure and `HH` the hour. The core stores sailing IDs as opaque text;
//! this type is for callers that want the parts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reasons a string is not a valid sailing ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SailingCodeError {
    /// Not exactly nine bytes
    #[error("sailing id must be 9 characters (LLL-DD-HH), got {0}")]
    WrongLength(usize),

    /// A character is not what the format requires at its position
    #[error("sailing id has invalid character at position {0} (expected LLL-DD-HH)")]
    InvalidCharacter(usize),
}

/// A parsed sailing ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SailingCode {
    terminal: [u8; 3],
    day: u8,
    hour: u8,
}

impl SailingCode {
    /// Parse `LLL-DD-HH`: three ASCII letters, dash, two digits, dash, two digits.
    pub fn parse(s: &str) -> Result<Self, SailingCodeError> {
        let b = s.as_bytes();
        if b.len() != 9 {
            return Err(SailingCodeError::WrongLength(b.len()));
        }
        for (i, &c) in b.iter().enumerate() {
            let ok = match i {
                0..=2 => c.is_ascii_alphabetic(),
                3 | 6 => c == b'-',
                _ => c.is_ascii_digit(),
            };
            if !ok {
                return Err(SailingCodeError::InvalidCharacter(i));
            }
        }
        Ok(SailingCode {
            terminal: [b[0], b[1], b[2]],
            day: (b[4] - b'0') * 10 + (b[5] - b'0'),
            hour: (b[7] - b'0') * 10 + (b[8] - b'0'),
        })
    }

    /// Departure terminal letters.
    pub fn terminal(&self) -> &str {
        // Only ASCII letters pass `parse`.
        std::str::from_utf8(&self.terminal).unwrap_or_default()
    }

    /// Day of departure.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of departure.
    pub fn hour(&self) -> u8 {
        self.hour
    }
}

impl FromStr for SailingCode {
    type Err = SailingCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SailingCode::parse(s)
    }
}

impl fmt::Display for SailingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.terminal(), self.day, self.hour)
    }
}
