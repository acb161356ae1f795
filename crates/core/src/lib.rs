//! Core types for ferrydb
//!
//! This crate defines the records persisted by the storage layer:
//! - Vessel: a ship and its two lane capacities
//! - Sailing: one departure of a vessel with its remaining lane length
//! - Vehicle: a licence plate with its contact phone and dimensions
//! - Reservation: a (sailing, vehicle) booking
//! - FixedRecord: the fixed-width binary codec every record implements
//! - Limits: field widths and dimension bounds shared with the console layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod model;
pub mod record;

pub use error::{RecordError, Result};
pub use model::{
    Reservation, Sailing, SailingCode, SailingCodeError, Vehicle, VehicleDetails, Vessel,
};
pub use record::FixedRecord;
