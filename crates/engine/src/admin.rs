//! Vessel and sailing creation

use ferry_core::{Sailing, Vessel};
use tracing::info;

use crate::database::FerryDatabase;
use crate::error::{FerryError, Result};

impl FerryDatabase {
    /// Add a vessel with the given lane lengths.
    ///
    /// Fails with `DuplicateKey` if the name is taken and with
    /// `NonPositiveLength` if either lane length is not positive.
    pub fn create_vessel(&mut self, name: &str, low: f32, high: f32) -> Result<Vessel> {
        let vessel = Vessel::new(name, low, high)?;
        if self.find_vessel(name)?.is_some() {
            return Err(FerryError::duplicate("vessel", name));
        }
        self.vessels.append(&vessel)?;
        info!(name, low, high, "Created vessel");
        Ok(vessel)
    }

    /// Add a sailing on `vessel_name`, starting with the vessel's full
    /// lane lengths remaining.
    ///
    /// The id is stored as given; format checking is the caller's job
    /// (see `SailingCode`). Fails with `DuplicateKey` if the id is taken
    /// and `NotFound` if the vessel does not exist.
    pub fn create_sailing(&mut self, sailing_id: &str, vessel_name: &str) -> Result<Sailing> {
        if self.sailing_exists(sailing_id)? {
            return Err(FerryError::duplicate("sailing", sailing_id));
        }
        let vessel = self
            .find_vessel(vessel_name)?
            .ok_or_else(|| FerryError::not_found("vessel", vessel_name))?;
        let sailing = Sailing::for_vessel(sailing_id, &vessel)?;
        self.sailings.append(&sailing)?;
        info!(
            sailing_id,
            vessel = vessel_name,
            low = sailing.low_remaining_length,
            high = sailing.high_remaining_length,
            "Created sailing"
        );
        Ok(sailing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::RecordError;
    use ferry_storage::StoreConfig;
    use tempfile::tempdir;

    #[test]
    fn test_create_vessel_and_sailing() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();

        let vessel = db.create_vessel("Spirit", 100.0, 200.0).unwrap();
        assert_eq!(vessel.low_lane_length, 100.0);

        let sailing = db.create_sailing("ABC-01-08", "Spirit").unwrap();
        assert_eq!(sailing.vessel_name, "Spirit");
        assert_eq!(sailing.low_remaining_length, 100.0);
        assert_eq!(sailing.high_remaining_length, 200.0);
        assert!(db.sailing_exists("ABC-01-08").unwrap());
    }

    #[test]
    fn test_duplicate_vessel() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        db.create_vessel("Spirit", 100.0, 200.0).unwrap();

        let err = db.create_vessel("Spirit", 1.0, 1.0).unwrap_err();
        assert!(matches!(err, FerryError::DuplicateKey { kind: "vessel", .. }));
        assert_eq!(db.vessels().unwrap().count(), 1);
    }

    #[test]
    fn test_duplicate_sailing() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        db.create_vessel("Spirit", 100.0, 200.0).unwrap();
        db.create_sailing("ABC-01-08", "Spirit").unwrap();

        let err = db.create_sailing("ABC-01-08", "Spirit").unwrap_err();
        assert!(matches!(err, FerryError::DuplicateKey { kind: "sailing", .. }));
    }

    #[test]
    fn test_sailing_requires_vessel() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        let err = db.create_sailing("ABC-01-08", "Ghost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(db.sailings().unwrap().count(), 0);
    }

    #[test]
    fn test_non_positive_lane_rejected() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        let err = db.create_vessel("Spirit", 0.0, 200.0).unwrap_err();
        assert!(matches!(
            err,
            FerryError::Record(RecordError::NonPositiveLength { .. })
        ));
        assert_eq!(db.vessels().unwrap().count(), 0);
    }

    #[test]
    fn test_long_vessel_name_rejected() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        let err = db
            .create_vessel("A Name Far Too Long For The Record", 1.0, 1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            FerryError::Record(RecordError::FieldTooLong { .. })
        ));
    }
}
