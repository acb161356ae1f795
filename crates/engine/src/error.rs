//! Error types for the reservation engine
//!
//! Storage errors pass through unchanged inside `FerryError::Store`; the
//! engine adds the business failures (missing entities, duplicates, no
//! lane space) on top.

use ferry_core::RecordError;
use ferry_storage::StoreError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::ledger::InsufficientSpace;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, FerryError>;

/// Errors surfaced to the console layer
#[derive(Debug, Error)]
pub enum FerryError {
    /// Record store failure, propagated unmodified
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A value does not fit its record field
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Data directory configuration is unreadable or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Key lookup miss
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Entity kind
        kind: &'static str,
        /// Natural key looked up
        key: String,
    },

    /// An entity with this natural key already exists
    #[error("{kind} already exists: {key}")]
    DuplicateKey {
        /// Entity kind
        kind: &'static str,
        /// Natural key
        key: String,
    },

    /// Neither permitted lane on the sailing has room for the vehicle
    #[error("sailing {sailing_id} is full: {source}")]
    CapacityExceeded {
        /// Sailing being booked
        sailing_id: String,
        /// Ledger rejection
        #[source]
        source: InsufficientSpace,
    },

    /// The licence is new and the caller supplied no vehicle details
    #[error("vehicle {licence} is not on file and no details were supplied")]
    VehicleDetailsRequired {
        /// Licence looked up
        licence: String,
    },
}

impl FerryError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        FerryError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        FerryError::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    /// True for any key lookup miss, from the engine or the store.
    pub fn is_not_found(&self) -> bool {
        match self {
            FerryError::NotFound { .. } => true,
            FerryError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LaneClass;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_not_found() {
        let err = FerryError::not_found("sailing", "ABC-01-08");
        assert_eq!(err.to_string(), "sailing not found: ABC-01-08");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_display_capacity() {
        let err = FerryError::CapacityExceeded {
            sailing_id: "ABC-01-08".to_string(),
            source: InsufficientSpace {
                length: 250.0,
                class: LaneClass::HighRoofOnly,
                low_remaining: 95.0,
                high_remaining: 150.0,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("ABC-01-08"));
        assert!(msg.contains("250"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_store_errors_pass_through() {
        let err: FerryError = StoreError::NotFound {
            kind: "reservation",
            path: PathBuf::from("reservations.dat"),
        }
        .into();
        assert!(matches!(err, FerryError::Store(StoreError::NotFound { .. })));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no matching reservation record in reservations.dat"
        );
    }
}
