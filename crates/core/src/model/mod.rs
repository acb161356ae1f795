//! Persisted entities
//!
//! Each entity is keyed by a natural business key, never a surrogate ID:
//! vessels by name, sailings by sailing ID, vehicles by licence, and
//! reservations by the (sailing ID, licence) pair.

mod reservation;
mod sailing;
mod sailing_code;
mod vehicle;
mod vessel;

pub use reservation::Reservation;
pub use sailing::Sailing;
pub use sailing_code::{SailingCode, SailingCodeError};
pub use vehicle::{Vehicle, VehicleDetails};
pub use vessel::Vessel;
