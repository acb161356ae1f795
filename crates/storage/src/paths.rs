//! Data directory structure
//!
//! All state lives in one directory, one file per entity kind:
//!
//! ```text
//! data/
//! ├── vessels.dat
//! ├── sailings.dat
//! ├── vehicles.dat
//! └── reservations.dat
//! ```

use std::path::{Path, PathBuf};

/// Paths of the record files inside a data directory.
#[derive(Debug, Clone)]
pub struct FerryPaths {
    root: PathBuf,
}

impl FerryPaths {
    /// Create paths from the root data directory.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        FerryPaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vessel records.
    pub fn vessels(&self) -> PathBuf {
        self.root.join("vessels.dat")
    }

    /// Sailing records.
    pub fn sailings(&self) -> PathBuf {
        self.root.join("sailings.dat")
    }

    /// Vehicle records.
    pub fn vehicles(&self) -> PathBuf {
        self.root.join("vehicles.dat")
    }

    /// Reservation records.
    pub fn reservations(&self) -> PathBuf {
        self.root.join("reservations.dat")
    }

    /// Create the data directory if missing.
    pub fn create_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_names() {
        let paths = FerryPaths::from_root("/var/ferry");
        assert_eq!(paths.vessels(), PathBuf::from("/var/ferry/vessels.dat"));
        assert_eq!(paths.sailings(), PathBuf::from("/var/ferry/sailings.dat"));
        assert_eq!(paths.vehicles(), PathBuf::from("/var/ferry/vehicles.dat"));
        assert_eq!(
            paths.reservations(),
            PathBuf::from("/var/ferry/reservations.dat")
        );
    }

    #[test]
    fn test_create_directories() {
        let dir = tempdir().unwrap();
        let paths = FerryPaths::from_root(dir.path().join("nested").join("data"));
        paths.create_directories().unwrap();
        assert!(paths.root().is_dir());
    }
}
