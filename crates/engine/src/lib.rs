//! Reservation engine for ferrydb
//!
//! This crate sits on top of the record stores:
//! - `FerryDatabase`: the four stores of one data directory, with queries
//!   and administration
//! - `CapacityLedger`: lane allocation and release over a sailing
//! - `ReservationCoordinator`: booking, check-in and cancellation with a
//!   fixed write order across files
//!
//! Everything is synchronous and single-threaded; every mutating call takes
//! `&mut self`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod admin;
pub mod config;
pub mod coordinator;
pub mod database;
pub mod error;
pub mod ledger;
pub mod query;

pub use config::{ConfigError, FerryConfig, CONFIG_FILE_NAME};
pub use coordinator::{compute_fare, BookingOutcome, CheckIn, ReservationCoordinator};
pub use database::FerryDatabase;
pub use error::{FerryError, Result};
pub use ledger::{CapacityLedger, InsufficientSpace, Lane, LaneChange, LaneClass, LENGTH_TOLERANCE};
pub use query::{ReservationLine, SailingDetails, SailingReportRow};
