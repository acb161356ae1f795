//! ferrydb - Ferry reservations on fixed-length record files
//!
//! ferrydb keeps vessels, sailings, vehicles and reservations in four flat
//! binary files, one fixed-width record per entity, and books vehicles onto
//! the two lane pools of each sailing.
//!
//! # Quick Start
//!
//! ```no_run
//! use ferrydb::{ReservationCoordinator, VehicleDetails};
//!
//! # fn main() -> ferrydb::Result<()> {
//! let mut coord = ReservationCoordinator::open("./ferry-data")?;
//! coord.database().create_vessel("Spirit", 100.0, 200.0)?;
//! coord.database().create_sailing("ABC-01-08", "Spirit")?;
//!
//! let car = VehicleDetails::new("6045551234", 5.0, 1.5);
//! coord.create_reservation("ABC-01-08", "XYZ123", Some(&car))?;
//! let checked = coord.check_in("ABC-01-08", "XYZ123", None)?;
//! assert_eq!(checked.fare, 14.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `ferry-core`: entity records and their byte layout
//! - `ferry-storage`: `RecordStore<T>`, one file per entity kind
//! - `ferry-engine`: lane ledger, coordinator, queries and administration
//!
//! The console layer (menus, prompting, report rendering) lives outside
//! this crate and calls into the engine API re-exported here.

pub use ferry_core::{
    limits, FixedRecord, RecordError, Reservation, Sailing, SailingCode, SailingCodeError,
    Vehicle, VehicleDetails, Vessel,
};
pub use ferry_engine::{
    compute_fare, BookingOutcome, CapacityLedger, CheckIn, ConfigError, FerryConfig,
    FerryDatabase, FerryError, InsufficientSpace, Lane, LaneChange, LaneClass, ReservationCoordinator,
    ReservationLine, Result, SailingDetails, SailingReportRow,
};
pub use ferry_storage::{FerryPaths, RecordStore, StoreConfig, StoreError, SyncMode};
