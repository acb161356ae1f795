//! Read-only lookups for the console
//!
//! Every query is a linear scan from the first record. The iterator
//! queries borrow the database mutably (they move the store cursor) and
//! restart from the top each time they are called.

use ferry_core::{Reservation, Sailing, Vehicle, Vessel};
use ferry_storage::Records;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::FerryDatabase;
use crate::error::{FerryError, Result};

/// One reservation on a sailing, joined with its vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationLine {
    /// The reservation
    pub reservation: Reservation,
    /// Vehicle record, `None` if missing from the vehicle file
    pub vehicle: Option<Vehicle>,
}

impl ReservationLine {
    /// High-roof ("special") vehicles are those not booked as low-roof.
    pub fn is_special(&self) -> bool {
        !self.reservation.is_lrl
    }
}

/// A sailing with its vessel and every reservation on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SailingDetails {
    /// The sailing
    pub sailing: Sailing,
    /// Vessel record, `None` if the referenced vessel does not exist
    pub vessel: Option<Vessel>,
    /// Reservations in file order
    pub reservations: Vec<ReservationLine>,
}

/// One row of the sailing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SailingReportRow {
    /// Sailing id
    pub sailing_id: String,
    /// Vessel name
    pub vessel_name: String,
    /// Low lane length remaining
    pub low_remaining: f32,
    /// High lane length remaining
    pub high_remaining: f32,
    /// Number of reservations on the sailing
    pub vehicles: usize,
    /// Remaining lane length as a percentage of the vessel's total,
    /// `None` if the vessel is missing or has no lanes
    pub percent_remaining: Option<f32>,
}

impl FerryDatabase {
    /// True if a sailing with `sailing_id` exists.
    pub fn sailing_exists(&mut self, sailing_id: &str) -> Result<bool> {
        Ok(self.find_sailing(sailing_id)?.is_some())
    }

    /// Number of reservations on `sailing_id`.
    pub fn count_reservations(&mut self, sailing_id: &str) -> Result<usize> {
        Ok(self.reservations.count(|r| r.sailing_id == sailing_id)?)
    }

    /// Iterate sailings from the first record.
    pub fn sailings(&mut self) -> Result<Records<'_, Sailing>> {
        Ok(self.sailings.iter()?)
    }

    /// Iterate vessels from the first record.
    pub fn vessels(&mut self) -> Result<Records<'_, Vessel>> {
        Ok(self.vessels.iter()?)
    }

    /// Look up a sailing by id.
    pub fn find_sailing(&mut self, sailing_id: &str) -> Result<Option<Sailing>> {
        debug!(sailing_id, "Looking up sailing");
        Ok(self
            .sailings
            .find(|s| s.sailing_id == sailing_id)?
            .map(|(_, s)| s))
    }

    /// Look up a vessel by name.
    pub fn find_vessel(&mut self, name: &str) -> Result<Option<Vessel>> {
        Ok(self.vessels.find(|v| v.name == name)?.map(|(_, v)| v))
    }

    /// Look up a vehicle by licence.
    pub fn find_vehicle(&mut self, licence: &str) -> Result<Option<Vehicle>> {
        Ok(self
            .vehicles
            .find(|v| v.licence == licence)?
            .map(|(_, v)| v))
    }

    /// Look up the reservation for a (sailing, licence) pair.
    pub fn find_reservation(
        &mut self,
        sailing_id: &str,
        licence: &str,
    ) -> Result<Option<Reservation>> {
        Ok(self
            .reservations
            .find(|r| r.matches(sailing_id, licence))?
            .map(|(_, r)| r))
    }

    /// Combined lane length of the named vessel.
    pub fn vessel_total_length(&mut self, name: &str) -> Result<f32> {
        self.find_vessel(name)?
            .map(|v| v.total_lane_length())
            .ok_or_else(|| FerryError::not_found("vessel", name))
    }

    /// The sailing, its vessel and its reservations joined with vehicles.
    pub fn sailing_details(&mut self, sailing_id: &str) -> Result<SailingDetails> {
        let sailing = self
            .find_sailing(sailing_id)?
            .ok_or_else(|| FerryError::not_found("sailing", sailing_id))?;
        let vessel = self.find_vessel(&sailing.vessel_name)?;

        let booked: Vec<Reservation> = self
            .reservations
            .load_all()?
            .into_iter()
            .filter(|r| r.sailing_id == sailing_id)
            .collect();
        let vehicles = self.vehicles.load_all()?;

        let reservations = booked
            .into_iter()
            .map(|reservation| {
                let vehicle = vehicles
                    .iter()
                    .find(|v| v.licence == reservation.licence)
                    .cloned();
                ReservationLine {
                    reservation,
                    vehicle,
                }
            })
            .collect();

        Ok(SailingDetails {
            sailing,
            vessel,
            reservations,
        })
    }

    /// One report row per sailing, in file order.
    pub fn sailing_report(&mut self) -> Result<Vec<SailingReportRow>> {
        let sailings = self.sailings.load_all()?;
        let vessels = self.vessels.load_all()?;
        let reservations = self.reservations.load_all()?;

        let rows = sailings
            .into_iter()
            .map(|s| {
                let vehicles = reservations
                    .iter()
                    .filter(|r| r.sailing_id == s.sailing_id)
                    .count();
                let percent_remaining = vessels
                    .iter()
                    .find(|v| v.name == s.vessel_name)
                    .map(Vessel::total_lane_length)
                    .filter(|total| *total > 0.0)
                    .map(|total| s.total_remaining() * 100.0 / total);
                SailingReportRow {
                    sailing_id: s.sailing_id,
                    vessel_name: s.vessel_name,
                    low_remaining: s.low_remaining_length,
                    high_remaining: s.high_remaining_length,
                    vehicles,
                    percent_remaining,
                }
            })
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::ReservationCoordinator;
    use ferry_core::VehicleDetails;
    use ferry_storage::StoreConfig;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, ReservationCoordinator) {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        db.create_vessel("Spirit", 100.0, 200.0).unwrap();
        db.create_sailing("ABC-01-08", "Spirit").unwrap();
        db.create_sailing("ABC-02-10", "Spirit").unwrap();
        (dir, ReservationCoordinator::new(db))
    }

    #[test]
    fn test_empty_database_queries() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        assert!(!db.sailing_exists("ABC-01-08").unwrap());
        assert_eq!(db.count_reservations("ABC-01-08").unwrap(), 0);
        assert_eq!(db.sailings().unwrap().count(), 0);
        assert!(db.sailing_report().unwrap().is_empty());
    }

    #[test]
    fn test_sailings_iterator_restarts() {
        let (_dir, mut coord) = setup();
        let db = coord.database();
        let first: Vec<String> = db
            .sailings()
            .unwrap()
            .map(|s| s.unwrap().sailing_id)
            .collect();
        let second: Vec<String> = db
            .sailings()
            .unwrap()
            .map(|s| s.unwrap().sailing_id)
            .collect();
        assert_eq!(first, vec!["ABC-01-08", "ABC-02-10"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_vessels_iterator() {
        let (_dir, mut coord) = setup();
        let names: Vec<String> = coord
            .database()
            .vessels()
            .unwrap()
            .map(|v| v.unwrap().name)
            .collect();
        assert_eq!(names, vec!["Spirit"]);
    }

    #[test]
    fn test_vessel_total_length() {
        let (_dir, mut coord) = setup();
        assert_eq!(coord.database().vessel_total_length("Spirit").unwrap(), 300.0);
        assert!(coord
            .database()
            .vessel_total_length("Ghost")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_sailing_details_joins_vehicles() {
        let (_dir, mut coord) = setup();
        coord
            .create_reservation(
                "ABC-01-08",
                "CAR1",
                Some(&VehicleDetails::new("6045551111", 5.0, 1.5)),
            )
            .unwrap();
        coord
            .create_reservation(
                "ABC-01-08",
                "TRUCK1",
                Some(&VehicleDetails::new("6045552222", 20.0, 3.5)),
            )
            .unwrap();
        coord.check_in("ABC-01-08", "TRUCK1", None).unwrap();

        let details = coord.database().sailing_details("ABC-01-08").unwrap();
        assert_eq!(details.vessel.as_ref().unwrap().name, "Spirit");
        assert_eq!(details.reservations.len(), 2);

        let car = &details.reservations[0];
        assert_eq!(car.vehicle.as_ref().unwrap().phone, "6045551111");
        assert!(!car.is_special());
        assert!(!car.reservation.on_board);

        let truck = &details.reservations[1];
        assert!(truck.is_special());
        assert!(truck.reservation.on_board);
        assert_eq!(truck.vehicle.as_ref().unwrap().length, 20.0);
    }

    #[test]
    fn test_sailing_details_unknown_sailing() {
        let (_dir, mut coord) = setup();
        assert!(coord
            .database()
            .sailing_details("ZZZ-09-09")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_sailing_report_rows() {
        let (_dir, mut coord) = setup();
        coord
            .create_reservation(
                "ABC-01-08",
                "TRUCK1",
                Some(&VehicleDetails::new("6045552222", 30.0, 3.5)),
            )
            .unwrap();

        let rows = coord.database().sailing_report().unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].sailing_id, "ABC-01-08");
        assert_eq!(rows[0].vehicles, 1);
        assert_eq!(rows[0].high_remaining, 170.0);
        assert_eq!(rows[0].percent_remaining, Some(90.0));

        assert_eq!(rows[1].vehicles, 0);
        assert_eq!(rows[1].percent_remaining, Some(100.0));
    }
}
