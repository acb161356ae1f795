//! Error types for record stores
//!
//! One variant per failing step. Nothing here is retried: the store reports
//! the first failure and the caller decides what to do with it.

use std::io;
use std::path::PathBuf;

use ferry_core::RecordError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation attempted before `open()` or after `close()`
    #[error("{}: store is not open", .path.display())]
    NotOpen {
        /// Backing file
        path: PathBuf,
    },

    /// `close()` called on a store that is already closed
    #[error("{}: store was already closed", .path.display())]
    AlreadyClosed {
        /// Backing file
        path: PathBuf,
    },

    /// Backing file could not be opened or created
    #[error("cannot open or create {}: {source}", .path.display())]
    StorageUnavailable {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading a record failed
    #[error("read failed on {}: {source}", .path.display())]
    ReadFailed {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a record, or replacing the file during a rewrite, failed
    #[error("write failed on {}: {source}", .path.display())]
    WriteFailed {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Shrinking the file after a swap-delete failed
    #[error("truncate failed on {}: {source}", .path.display())]
    TruncateFailed {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// No record matched the delete predicate
    #[error("no matching {kind} record in {}", .path.display())]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Backing file
        path: PathBuf,
    },

    /// Delete attempted on a store holding zero records
    #[error("{}: no {kind} records to delete", .path.display())]
    EmptyStore {
        /// Record kind
        kind: &'static str,
        /// Backing file
        path: PathBuf,
    },

    /// A full-width record could not be decoded
    #[error("{}: cannot decode record {index}: {source}", .path.display())]
    Decode {
        /// Backing file
        path: PathBuf,
        /// Record index
        index: u64,
        /// Decoding error
        #[source]
        source: RecordError,
    },
}

impl StoreError {
    /// True for a key lookup miss (`NotFound` or `EmptyStore`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. } | StoreError::EmptyStore { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_open() {
        let err = StoreError::NotOpen {
            path: PathBuf::from("sailings.dat"),
        };
        assert_eq!(err.to_string(), "sailings.dat: store is not open");
    }

    #[test]
    fn test_error_display_truncate() {
        let err = StoreError::TruncateFailed {
            path: PathBuf::from("reservations.dat"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("truncate failed"));
        assert!(msg.contains("reservations.dat"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_is_not_found() {
        let path = PathBuf::from("vessels.dat");
        assert!(StoreError::NotFound {
            kind: "vessel",
            path: path.clone()
        }
        .is_not_found());
        assert!(StoreError::EmptyStore {
            kind: "vessel",
            path: path.clone()
        }
        .is_not_found());
        assert!(!StoreError::NotOpen { path }.is_not_found());
    }
}
