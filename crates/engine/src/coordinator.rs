//! Reservation coordinator
//!
//! Booking, check-in and cancellation across the vehicle, sailing and
//! reservation stores. There is no rollback across files; each operation
//! checks everything it can before its first write and then persists in a
//! fixed order:
//!
//! | Operation | Writes, in order |
//! |-----------|------------------|
//! | create | vehicle (new licence only), sailing slot, reservation append |
//! | check-in | [create], reservation slot |
//! | cancel | reservation swap-delete, sailing slot |
//! | cancel all | reservation file rewrite, sailing swap-delete |
//!
//! Lookups are linear scans keyed by sailing id and licence; record
//! positions are never cached across operations.

use std::path::Path;

use ferry_core::limits::{FARE_PER_HEIGHT_METER, FARE_PER_LENGTH_METER, LOW_ROOF_FARE};
use ferry_core::{Reservation, Sailing, Vehicle, VehicleDetails};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::database::FerryDatabase;
use crate::error::{FerryError, Result};
use crate::ledger::{CapacityLedger, Lane, LaneClass};

/// Outcome of `create_reservation`.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// A new reservation was written
    Booked {
        /// The stored reservation
        reservation: Reservation,
        /// Sailing after allocation
        sailing: Sailing,
        /// Lane the vehicle was placed on
        lane: Lane,
    },
    /// The pair was already booked; nothing was written
    AlreadyBooked(Reservation),
}

impl BookingOutcome {
    /// The reservation, new or existing.
    pub fn reservation(&self) -> &Reservation {
        match self {
            BookingOutcome::Booked { reservation, .. } => reservation,
            BookingOutcome::AlreadyBooked(reservation) => reservation,
        }
    }

    /// True if this call wrote a new reservation.
    pub fn is_new(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }
}

/// Result of a check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Reservation with `on_board` set
    pub reservation: Reservation,
    /// Fare to collect
    pub fare: f32,
    /// True if no reservation existed and one was booked first
    pub booked_at_check_in: bool,
}

/// Fare for a vehicle: flat for low-roof reservations, otherwise
/// 2 per meter of length plus 3 per meter of height.
pub fn compute_fare(is_lrl: bool, length: f32, height: f32) -> f32 {
    if is_lrl {
        LOW_ROOF_FARE
    } else {
        FARE_PER_LENGTH_METER * length + FARE_PER_HEIGHT_METER * height
    }
}

/// Coordinates reservations over an owned `FerryDatabase`.
pub struct ReservationCoordinator {
    db: FerryDatabase,
}

impl ReservationCoordinator {
    /// Wrap an open database.
    pub fn new(db: FerryDatabase) -> Self {
        ReservationCoordinator { db }
    }

    /// Open the database at `path` and wrap it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(FerryDatabase::open(path)?))
    }

    /// Underlying database, for queries and administration.
    pub fn database(&mut self) -> &mut FerryDatabase {
        &mut self.db
    }

    /// Release the database.
    pub fn into_database(self) -> FerryDatabase {
        self.db
    }

    /// Book `licence` on `sailing_id`.
    ///
    /// `details` is only consulted when the licence has no vehicle record;
    /// an unknown licence without details fails with
    /// `VehicleDetailsRequired`. Booking an existing pair returns
    /// `AlreadyBooked` and writes nothing.
    pub fn create_reservation(
        &mut self,
        sailing_id: &str,
        licence: &str,
        details: Option<&VehicleDetails>,
    ) -> Result<BookingOutcome> {
        self.create_reservation_with(sailing_id, licence, || details.cloned())
    }

    /// Like `create_reservation`, but asks `details` for the vehicle's
    /// dimensions only when the licence is not on file.
    pub fn create_reservation_with<F>(
        &mut self,
        sailing_id: &str,
        licence: &str,
        details: F,
    ) -> Result<BookingOutcome>
    where
        F: FnOnce() -> Option<VehicleDetails>,
    {
        let existing_vehicle = self
            .db
            .vehicles
            .find(|v| v.licence == licence)?
            .map(|(_, v)| v);

        if let Some((_, reservation)) = self
            .db
            .reservations
            .find(|r| r.matches(sailing_id, licence))?
        {
            debug!(sailing_id, licence, "Reservation already exists");
            return Ok(BookingOutcome::AlreadyBooked(reservation));
        }

        let (vehicle, is_new_vehicle) = match existing_vehicle {
            Some(vehicle) => (vehicle, false),
            None => {
                let details = details().ok_or_else(|| FerryError::VehicleDetailsRequired {
                    licence: licence.to_string(),
                })?;
                (Vehicle::new(licence, &details)?, true)
            }
        };

        let (_, sailing) = self
            .db
            .sailings
            .find(|s| s.sailing_id == sailing_id)?
            .ok_or_else(|| FerryError::not_found("sailing", sailing_id))?;

        let class = CapacityLedger::classify(vehicle.length, vehicle.height);
        let change = CapacityLedger::new()
            .allocate(&sailing, vehicle.length, class)
            .map_err(|source| {
                warn!(
                    sailing_id,
                    licence,
                    length = vehicle.length,
                    low_remaining = sailing.low_remaining_length,
                    high_remaining = sailing.high_remaining_length,
                    "Booking rejected, no lane space"
                );
                FerryError::CapacityExceeded {
                    sailing_id: sailing_id.to_string(),
                    source,
                }
            })?;
        let reservation = Reservation::new(sailing_id, licence, class.is_lrl())?;

        if is_new_vehicle {
            self.db.vehicles.append(&vehicle)?;
            info!(licence, length = vehicle.length, height = vehicle.height, "Created vehicle");
        }
        self.store_sailing(&change.sailing)?;
        self.db.reservations.append(&reservation)?;

        info!(
            sailing_id,
            licence,
            lane = ?change.lane,
            low_remaining = change.sailing.low_remaining_length,
            high_remaining = change.sailing.high_remaining_length,
            "Booked reservation"
        );
        Ok(BookingOutcome::Booked {
            reservation,
            sailing: change.sailing,
            lane: change.lane,
        })
    }

    /// Mark `licence` on board `sailing_id` and return the fare.
    ///
    /// A missing reservation is booked first with `details`, under the same
    /// rules as `create_reservation`, and charged the same fare. The fare
    /// is worked out before `on_board` is written.
    pub fn check_in(
        &mut self,
        sailing_id: &str,
        licence: &str,
        details: Option<&VehicleDetails>,
    ) -> Result<CheckIn> {
        let (booked, booked_at_check_in) = match self
            .db
            .reservations
            .find(|r| r.matches(sailing_id, licence))?
        {
            Some((_, reservation)) => (reservation, false),
            None => {
                let outcome = self.create_reservation(sailing_id, licence, details)?;
                (outcome.reservation().clone(), true)
            }
        };

        let fare = if booked.is_lrl {
            LOW_ROOF_FARE
        } else {
            let (_, vehicle) = self
                .db
                .vehicles
                .find(|v| v.licence == licence)?
                .ok_or_else(|| FerryError::not_found("vehicle", licence))?;
            compute_fare(false, vehicle.length, vehicle.height)
        };

        let reservation = self
            .db
            .reservations
            .update_first(|r| r.matches(sailing_id, licence), |r| r.on_board = true)?
            .ok_or_else(|| FerryError::not_found("reservation", key(sailing_id, licence)))?;

        info!(sailing_id, licence, fare, booked_at_check_in, "Checked in");
        Ok(CheckIn {
            reservation,
            fare,
            booked_at_check_in,
        })
    }

    /// Cancel one reservation and return its length to the sailing.
    ///
    /// The reservation, its vehicle and its sailing are all looked up
    /// before anything is written. Returns the sailing after release.
    pub fn cancel_reservation(&mut self, sailing_id: &str, licence: &str) -> Result<Sailing> {
        if self
            .db
            .reservations
            .find(|r| r.matches(sailing_id, licence))?
            .is_none()
        {
            return Err(FerryError::not_found(
                "reservation",
                key(sailing_id, licence),
            ));
        }
        let (_, vehicle) = self
            .db
            .vehicles
            .find(|v| v.licence == licence)?
            .ok_or_else(|| FerryError::not_found("vehicle", licence))?;
        let (_, sailing) = self
            .db
            .sailings
            .find(|s| s.sailing_id == sailing_id)?
            .ok_or_else(|| FerryError::not_found("sailing", sailing_id))?;
        let ledger = match self
            .db
            .vessels
            .find(|v| v.name == sailing.vessel_name)?
        {
            Some((_, vessel)) => CapacityLedger::for_vessel(&vessel),
            None => CapacityLedger::new(),
        };

        let removed = self
            .db
            .reservations
            .swap_remove(|r| r.matches(sailing_id, licence))?;
        let change = ledger.release(&sailing, vehicle.length, LaneClass::from_lrl(removed.is_lrl));
        self.store_sailing(&change.sailing)?;

        info!(
            sailing_id,
            licence,
            lane = ?change.lane,
            low_remaining = change.sailing.low_remaining_length,
            high_remaining = change.sailing.high_remaining_length,
            "Cancelled reservation"
        );
        Ok(change.sailing)
    }

    /// Remove every reservation on `sailing_id`, then the sailing itself.
    ///
    /// Lane counters are not recomputed; the sailing is gone afterwards.
    /// Returns the number of reservations removed.
    pub fn cancel_all_for_sailing(&mut self, sailing_id: &str) -> Result<usize> {
        if self
            .db
            .sailings
            .find(|s| s.sailing_id == sailing_id)?
            .is_none()
        {
            return Err(FerryError::not_found("sailing", sailing_id));
        }

        let removed = self.db.reservations.retain(|r| r.sailing_id != sailing_id)?;
        self.db.sailings.swap_remove(|s| s.sailing_id == sailing_id)?;

        info!(sailing_id, removed, "Deleted sailing and its reservations");
        Ok(removed)
    }

    fn store_sailing(&mut self, sailing: &Sailing) -> Result<()> {
        let low = sailing.low_remaining_length;
        let high = sailing.high_remaining_length;
        self.db
            .sailings
            .update_first(
                |s| s.sailing_id == sailing.sailing_id,
                |s| {
                    s.low_remaining_length = low;
                    s.high_remaining_length = high;
                },
            )?
            .ok_or_else(|| FerryError::not_found("sailing", sailing.sailing_id.as_str()))?;
        Ok(())
    }
}

fn key(sailing_id: &str, licence: &str) -> String {
    format!("{sailing_id}/{licence}")
}
