//! Record file corruption utilities
//!
//! # Corruption Types
//!
//! - Garbage: appends bytes shorter than a record (crash during append)
//! - Truncation: removes bytes from the tail (torn final record)
//! - Interrupted swap: copies the last record over a slot without
//!   truncating (crash between the overwrite and the truncate of a
//!   swap-delete)

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use ferry_core::FixedRecord;

/// Record file corruption test utilities
pub struct RecordCorruptionTester {
    path: PathBuf,
}

impl RecordCorruptionTester {
    /// Create a tester for one record file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        RecordCorruptionTester {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File being damaged.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file size in bytes.
    pub fn file_size(&self) -> std::io::Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    /// Append raw bytes at the end of the file.
    pub fn append_garbage(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    /// Remove up to `bytes` from the end of the file. Returns bytes removed.
    pub fn truncate_tail(&self, bytes: u64) -> std::io::Result<u64> {
        let size = self.file_size()?;
        let removed = bytes.min(size);
        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_len(size - removed)?;
        file.sync_all()?;
        Ok(removed)
    }

    /// Copy the last complete `T` record over slot `index` and stop, as a
    /// swap-delete would if the process died before truncating.
    pub fn interrupt_swap_delete<T: FixedRecord>(&self, index: u64) -> std::io::Result<()> {
        let width = T::WIDTH as u64;
        let count = self.file_size()? / width;
        if count == 0 || index >= count {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("slot {} out of range for {} records", index, count),
            ));
        }

        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let mut last = vec![0u8; T::WIDTH];
        file.seek(SeekFrom::Start((count - 1) * width))?;
        file.read_exact(&mut last)?;
        file.seek(SeekFrom::Start(index * width))?;
        file.write_all(&last)?;
        file.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::Vessel;
    use tempfile::tempdir;

    fn write_vessels(path: &Path, names: &[&str]) {
        let mut bytes = Vec::new();
        for name in names {
            bytes.extend(Vessel::new(name, 1.0, 2.0).unwrap().to_bytes());
        }
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_append_and_truncate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vessels.dat");
        write_vessels(&path, &["A"]);

        let tester = RecordCorruptionTester::new(&path);
        tester.append_garbage(&[1, 2, 3]).unwrap();
        assert_eq!(tester.file_size().unwrap(), 39);
        assert_eq!(tester.truncate_tail(5).unwrap(), 5);
        assert_eq!(tester.file_size().unwrap(), 34);
        assert_eq!(tester.truncate_tail(1000).unwrap(), 34);
    }

    #[test]
    fn test_interrupt_swap_delete_duplicates_last() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vessels.dat");
        write_vessels(&path, &["A", "B", "C"]);

        let tester = RecordCorruptionTester::new(&path);
        tester.interrupt_swap_delete::<Vessel>(0).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let first = Vessel::decode(&bytes[..36]).unwrap();
        let last = Vessel::decode(&bytes[72..]).unwrap();
        assert_eq!(first.name, "C");
        assert_eq!(last.name, "C");
        assert!(tester.interrupt_swap_delete::<Vessel>(3).is_err());
    }
}
