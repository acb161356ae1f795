//! Error types for record encoding
//!
//! Records have fixed-width text buffers, so encoding fails on text that
//! does not fit and decoding on byte slices that are too short. Vessel lane
//! lengths must also be positive.

use thiserror::Error;

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while building, encoding or decoding a fixed-width record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A text field does not fit in its NUL-terminated buffer
    #[error("{field} is {len} bytes, limit is {max}")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Length of the rejected value in bytes
        len: usize,
        /// Maximum length in bytes
        max: usize,
    },

    /// A length that must be positive is zero, negative or NaN
    #[error("{field} must be a positive length")]
    NonPositiveLength {
        /// Field name
        field: &'static str,
    },

    /// Buffer handed to `decode` is shorter than the record width
    #[error("short {kind} record: expected {expected} bytes, got {actual}")]
    ShortBuffer {
        /// Record kind being decoded
        kind: &'static str,
        /// Record width
        expected: usize,
        /// Bytes available
        actual: usize,
    },
}
