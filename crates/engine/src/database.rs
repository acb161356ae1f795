//! FerryDatabase: the four record stores of one data directory
//!
//! Opening a database creates the directory and a default `ferry.toml` if
//! they are missing, reads the sync mode from the config file, and opens
//! (creating if absent) `vessels.dat`, `sailings.dat`, `vehicles.dat` and
//! `reservations.dat`. Each store exclusively owns its file handle until
//! `close()` or drop.

use std::path::{Path, PathBuf};

use ferry_core::{Reservation, Sailing, Vehicle, Vessel};
use ferry_storage::{FerryPaths, RecordStore, StoreConfig, StoreError};
use tracing::{debug, info};

use crate::config::{ConfigError, FerryConfig, CONFIG_FILE_NAME};
use crate::error::Result;

/// Open stores for one data directory.
pub struct FerryDatabase {
    paths: FerryPaths,
    pub(crate) vessels: RecordStore<Vessel>,
    pub(crate) sailings: RecordStore<Sailing>,
    pub(crate) vehicles: RecordStore<Vehicle>,
    pub(crate) reservations: RecordStore<Reservation>,
}

impl FerryDatabase {
    /// Open the database at `path`, reading settings from `ferry.toml`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let paths = FerryPaths::from_root(path);
        create_root(&paths)?;
        let cfg = FerryConfig::load_or_create(paths.root())?;
        let store_config = cfg.store_config()?;
        Self::open_stores(paths, store_config)
    }

    /// Open the database with an explicit configuration.
    ///
    /// The config is written to `ferry.toml` so a later `open()` picks up
    /// the same settings.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: FerryConfig) -> Result<Self> {
        let store_config = cfg.store_config()?;
        let paths = FerryPaths::from_root(path);
        create_root(&paths)?;

        let config_path = paths.root().join(CONFIG_FILE_NAME);
        let content = toml::to_string(&cfg).map_err(|e| ConfigError::Parse {
            path: config_path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&config_path, content).map_err(|source| ConfigError::Io {
            path: config_path,
            source,
        })?;

        Self::open_stores(paths, store_config)
    }

    /// Open with a store config directly, bypassing `ferry.toml`.
    pub fn open_with_store_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Self> {
        let paths = FerryPaths::from_root(path);
        create_root(&paths)?;
        Self::open_stores(paths, config)
    }

    fn open_stores(paths: FerryPaths, config: StoreConfig) -> Result<Self> {
        let vessels = RecordStore::open_at(paths.vessels(), config.clone())?;
        let sailings = RecordStore::open_at(paths.sailings(), config.clone())?;
        let vehicles = RecordStore::open_at(paths.vehicles(), config.clone())?;
        let reservations = RecordStore::open_at(paths.reservations(), config)?;

        info!(root = %paths.root().display(), "Opened ferry database");
        Ok(FerryDatabase {
            paths,
            vessels,
            sailings,
            vehicles,
            reservations,
        })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Record file paths of this database.
    pub fn paths(&self) -> &FerryPaths {
        &self.paths
    }

    /// Release every open file handle.
    ///
    /// Closing twice fails with `AlreadyClosed` from the first store.
    pub fn close(&mut self) -> Result<()> {
        self.vessels.close()?;
        self.sailings.close()?;
        self.vehicles.close()?;
        self.reservations.close()?;
        debug!(root = %self.paths.root().display(), "Closed ferry database");
        Ok(())
    }

    /// Reopen every store after `close()`.
    pub fn reopen(&mut self) -> Result<()> {
        self.vessels.open()?;
        self.sailings.open()?;
        self.vehicles.open()?;
        self.reservations.open()?;
        Ok(())
    }

    /// Vessel store.
    pub fn vessel_store(&mut self) -> &mut RecordStore<Vessel> {
        &mut self.vessels
    }

    /// Sailing store.
    pub fn sailing_store(&mut self) -> &mut RecordStore<Sailing> {
        &mut self.sailings
    }

    /// Vehicle store.
    pub fn vehicle_store(&mut self) -> &mut RecordStore<Vehicle> {
        &mut self.vehicles
    }

    /// Reservation store.
    pub fn reservation_store(&mut self) -> &mut RecordStore<Reservation> {
        &mut self.reservations
    }
}

fn create_root(paths: &FerryPaths) -> Result<()> {
    paths
        .create_directories()
        .map_err(|source| StoreError::StorageUnavailable {
            path: PathBuf::from(paths.root()),
            source,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FerryError;
    use ferry_storage::SyncMode;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_files_and_config() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data");
        let db = FerryDatabase::open(&root).unwrap();

        assert!(db.paths().vessels().exists());
        assert!(db.paths().sailings().exists());
        assert!(db.paths().vehicles().exists());
        assert!(db.paths().reservations().exists());
        assert!(root.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_open_with_config_persists_settings() {
        let dir = tempdir().unwrap();
        let cfg = FerryConfig {
            sync: "never".to_string(),
        };
        drop(FerryDatabase::open_with_config(dir.path(), cfg).unwrap());

        let loaded = FerryConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded.sync_mode().unwrap(), SyncMode::Never);
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "sync = \"weekly\"").unwrap();

        let result = FerryDatabase::open(dir.path());
        assert!(matches!(
            result,
            Err(FerryError::Config(ConfigError::InvalidSync(_)))
        ));
    }

    #[test]
    fn test_close_twice_fails() {
        let dir = tempdir().unwrap();
        let mut db =
            FerryDatabase::open_with_store_config(dir.path(), StoreConfig::for_testing()).unwrap();
        db.close().unwrap();
        assert!(matches!(
            db.close(),
            Err(FerryError::Store(StoreError::AlreadyClosed { .. }))
        ));

        db.reopen().unwrap();
        assert!(db.vessel_store().is_open());
    }
}
