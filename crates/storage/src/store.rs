//! Fixed-length record file.
//!
//! A `RecordStore<T>` owns one file holding a flat sequence of `T::WIDTH`
//! byte records. There is no header and no index: lookups are linear scans
//! from the first record, and the record count is the file size divided by
//! the width.
//!
//! # Cursor
//!
//! The store keeps one cursor, a byte offset on a record boundary. `reset`
//! moves it to the first record, `read_next` reads at it and advances, and
//! `write(.., true)` overwrites the slot at it and advances. Appends go to
//! the logical end (`len() * WIDTH`) and leave the cursor alone.
//!
//! # Deletion
//!
//! `swap_remove` moves the last record into the deleted slot and shrinks the
//! file by one width. Record order is therefore NOT stable across deletes;
//! callers must look records up by key, never by position.
//!
//! # Partial Records
//!
//! A crash during an append can leave fewer than `WIDTH` bytes at the end of
//! the file. Reads treat such a tail as end-of-store, appends overwrite it,
//! and the next swap-delete or rewrite drops it.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use ferry_core::FixedRecord;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// A file of fixed-width `T` records.
pub struct RecordStore<T: FixedRecord> {
    /// Backing file path
    path: PathBuf,

    /// Open handle, `None` while closed
    file: Option<File>,

    /// Byte offset of the next read or cursor write
    cursor: u64,

    /// Sync behavior
    config: StoreConfig,

    _record: PhantomData<T>,
}

impl<T: FixedRecord> RecordStore<T> {
    /// Create a closed store for `path`.
    pub fn new(path: impl Into<PathBuf>, config: StoreConfig) -> Self {
        RecordStore {
            path: path.into(),
            file: None,
            cursor: 0,
            config,
            _record: PhantomData,
        }
    }

    /// Create a store for `path` and open it, creating the file if missing.
    pub fn open_at(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self> {
        let mut store = Self::new(path, config);
        store.open()?;
        Ok(store)
    }

    /// Open the backing file for reading and writing.
    ///
    /// If the file does not exist it is created empty and then opened again
    /// for reading and writing. Opening an already-open store replaces its
    /// handle. The cursor starts at the first record.
    pub fn open(&mut self) -> Result<()> {
        let file = open_or_create(&self.path).map_err(|source| StoreError::StorageUnavailable {
            path: self.path.clone(),
            source,
        })?;
        self.file = Some(file);
        self.cursor = 0;
        debug!(target: "ferrydb::store", path = %self.path.display(), kind = T::KIND, "Opened record store");
        Ok(())
    }

    /// Release the file handle.
    pub fn close(&mut self) -> Result<()> {
        match self.file.take() {
            Some(file) => {
                drop(file);
                debug!(target: "ferrydb::store", path = %self.path.display(), "Closed record store");
                Ok(())
            }
            None => Err(StoreError::AlreadyClosed {
                path: self.path.clone(),
            }),
        }
    }

    /// Whether the store currently holds a handle.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the cursor to the first record.
    pub fn reset(&mut self) -> Result<()> {
        self.handle()?;
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor to record `index`.
    pub fn seek(&mut self, index: u64) -> Result<()> {
        self.handle()?;
        self.cursor = index * width::<T>();
        Ok(())
    }

    /// Number of complete records in the file.
    pub fn len(&mut self) -> Result<u64> {
        let (file, path) = self.handle()?;
        let size = file
            .metadata()
            .map_err(|source| StoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        Ok(size / width::<T>())
    }

    /// True if the file holds no complete record.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read the record at the cursor and advance past it.
    ///
    /// Returns `Ok(None)` at end-of-store, including when fewer than
    /// `WIDTH` bytes remain; the cursor is not moved in that case.
    pub fn read_next(&mut self) -> Result<Option<T>> {
        let offset = self.cursor;
        let mut buf = vec![0u8; T::WIDTH];
        let filled = {
            let (file, path) = self.handle()?;
            read_at(file, offset, &mut buf).map_err(|source| StoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?
        };

        if filled < T::WIDTH {
            if filled > 0 {
                warn!(
                    target: "ferrydb::store",
                    path = %self.path.display(),
                    offset,
                    bytes = filled,
                    "Ignoring partial record at end of store"
                );
            }
            return Ok(None);
        }

        let record = T::decode(&buf).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            index: offset / width::<T>(),
            source,
        })?;
        self.cursor = offset + width::<T>();
        Ok(Some(record))
    }

    /// Write `record`.
    ///
    /// With `at_cursor == false` the record is appended at the logical end
    /// of the store and the cursor is left where it was. With
    /// `at_cursor == true` the slot at the cursor is overwritten and the
    /// cursor advances past it.
    pub fn write(&mut self, record: &T, at_cursor: bool) -> Result<()> {
        let offset = if at_cursor {
            self.cursor
        } else {
            self.len()? * width::<T>()
        };
        let bytes = record.to_bytes();
        let sync = self.config.sync.syncs();
        {
            let (file, path) = self.handle()?;
            write_at(file, offset, &bytes, sync).map_err(|source| StoreError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }
        if at_cursor {
            self.cursor = offset + width::<T>();
        }
        Ok(())
    }

    /// Append `record` at the logical end of the store.
    pub fn append(&mut self, record: &T) -> Result<()> {
        self.write(record, false)
    }

    /// Iterate over every record from the first, resetting the cursor.
    ///
    /// The iterator is finite; call `iter` again to restart it.
    pub fn iter(&mut self) -> Result<Records<'_, T>> {
        self.reset()?;
        Ok(Records {
            store: self,
            done: false,
        })
    }

    /// Read every record into memory.
    pub fn load_all(&mut self) -> Result<Vec<T>> {
        self.iter()?.collect()
    }

    /// Find the first record matching `predicate` and its index.
    pub fn find<P>(&mut self, mut predicate: P) -> Result<Option<(u64, T)>>
    where
        P: FnMut(&T) -> bool,
    {
        self.reset()?;
        let mut index = 0;
        while let Some(record) = self.read_next()? {
            if predicate(&record) {
                return Ok(Some((index, record)));
            }
            index += 1;
        }
        Ok(None)
    }

    /// Count records matching `predicate`.
    pub fn count<P>(&mut self, mut predicate: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let mut n = 0;
        for record in self.iter()? {
            if predicate(&record?) {
                n += 1;
            }
        }
        Ok(n)
    }

    /// Rewrite the first record matching `predicate` in place.
    ///
    /// Returns the updated record, or `None` if nothing matched. Only the
    /// matched slot is written.
    pub fn update_first<P, F>(&mut self, predicate: P, update: F) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let Some((index, mut record)) = self.find(predicate)? else {
            return Ok(None);
        };
        update(&mut record);
        self.seek(index)?;
        self.write(&record, true)?;
        Ok(Some(record))
    }

    /// Delete the first record matching `predicate` by swap-and-truncate.
    ///
    /// 1. Count the records (`N`); fail with `EmptyStore` if zero.
    /// 2. Scan for the first match at index `i`; fail with `NotFound` if none.
    /// 3. Copy the bytes of record `N-1` over slot `i`.
    /// 4. Release the handle, truncate the file to `N-1` records, reopen.
    ///
    /// Returns the deleted record. A failure between steps 3 and 4 leaves
    /// the last record duplicated in slot `i`; that state is reported
    /// through the error, not repaired.
    pub fn swap_remove<P>(&mut self, predicate: P) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        let total = self.len()?;
        if total == 0 {
            return Err(StoreError::EmptyStore {
                kind: T::KIND,
                path: self.path.clone(),
            });
        }

        let (target, removed) = self.find(predicate)?.ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            path: self.path.clone(),
        })?;

        let last = total - 1;
        let sync = self.config.sync.syncs();
        if target != last {
            let mut last_bytes = vec![0u8; T::WIDTH];
            let (file, path) = self.handle()?;
            let filled = read_at(file, last * width::<T>(), &mut last_bytes).map_err(|source| {
                StoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            if filled < T::WIDTH {
                return Err(StoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "last record is short"),
                });
            }
            write_at(file, target * width::<T>(), &last_bytes, sync).map_err(|source| {
                StoreError::WriteFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }

        self.file = None;
        let truncated = truncate(&self.path, last * width::<T>(), sync);
        self.reopen_after_truncate(truncated)?;

        debug!(
            target: "ferrydb::store",
            path = %self.path.display(),
            index = target,
            remaining = last,
            "Swap-deleted record"
        );
        Ok(removed)
    }

    /// Keep only records matching `keep`, replacing the file atomically.
    ///
    /// The retained records are written to a sibling temporary file, which
    /// is then renamed over the backing file. A crash leaves either the old
    /// or the new contents, never a mix. Returns the number of records
    /// dropped; when nothing is dropped the file is left untouched.
    pub fn retain<P>(&mut self, mut keep: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let all = self.load_all()?;
        let before = all.len();
        let kept: Vec<T> = all.into_iter().filter(|r| keep(r)).collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Ok(0);
        }
        self.replace_all(&kept)?;
        Ok(removed)
    }

    /// Replace the whole store with `records` via write-temp-then-rename.
    pub fn replace_all(&mut self, records: &[T]) -> Result<()> {
        self.handle()?;
        let sync = self.config.sync.syncs();
        let temp = temp_path(&self.path);

        let mut bytes = Vec::with_capacity(records.len() * T::WIDTH);
        for record in records {
            bytes.extend_from_slice(&record.to_bytes());
        }
        write_new_file(&temp, &bytes, sync).map_err(|source| StoreError::WriteFailed {
            path: temp.clone(),
            source,
        })?;

        self.file = None;
        if let Err(source) = std::fs::rename(&temp, &self.path) {
            // Leave the store usable on its old contents.
            let _ = std::fs::remove_file(&temp);
            self.open()?;
            return Err(StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            });
        }
        if sync {
            sync_parent(&self.path).map_err(|source| StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        }
        self.open()?;

        info!(
            target: "ferrydb::store",
            path = %self.path.display(),
            records = records.len(),
            "Rewrote record store"
        );
        Ok(())
    }

    /// Reopen the released handle whether or not the truncate succeeded.
    ///
    /// On failure the store stays usable, and the slot copy made before
    /// the truncate is not undone.
    fn reopen_after_truncate(&mut self, truncated: io::Result<()>) -> Result<()> {
        match truncated {
            Ok(()) => self.open(),
            Err(source) => {
                let _ = self.open();
                Err(StoreError::TruncateFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn handle(&mut self) -> Result<(&mut File, &Path)> {
        match self.file.as_mut() {
            Some(file) => Ok((file, &self.path)),
            None => Err(StoreError::NotOpen {
                path: self.path.clone(),
            }),
        }
    }
}

/// Iterator over a store's records, from the first.
///
/// Yields `Err` at most once, then stops.
pub struct Records<'a, T: FixedRecord> {
    store: &'a mut RecordStore<T>,
    done: bool,
}

impl<T: FixedRecord> Iterator for Records<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.store.read_next() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn width<T: FixedRecord>() -> u64 {
    T::WIDTH as u64
}

fn open_or_create(path: &Path) -> io::Result<File> {
    match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            OpenOptions::new().write(true).create(true).open(path)?;
            OpenOptions::new().read(true).write(true).open(path)
        }
        Err(e) => Err(e),
    }
}

/// Read up to `buf.len()` bytes at `offset`, stopping early only at EOF.
fn read_at(file: &mut File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    file.seek(SeekFrom::Start(offset))?;
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn write_at(file: &mut File, offset: u64, bytes: &[u8], sync: bool) -> io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(bytes)?;
    file.flush()?;
    if sync {
        file.sync_data()?;
    }
    Ok(())
}

fn truncate(path: &Path, len: u64, sync: bool) -> io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

fn write_new_file(path: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

fn sync_parent(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

/// Temporary sibling used while rewriting `path`: `.<name>.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
