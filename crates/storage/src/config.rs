//! Store configuration
//!
//! Controls how eagerly a store pushes its writes to stable storage.

/// When a store calls `sync_all` on its backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Sync after every write, truncate and rename (maximum durability)
    #[default]
    Always,
    /// Leave flushing to the operating system
    Never,
}

impl SyncMode {
    /// True if writes must be synced before returning.
    pub fn syncs(&self) -> bool {
        matches!(self, SyncMode::Always)
    }
}

/// Record store configuration
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Sync behavior for writes
    pub sync: SyncMode,
}

impl StoreConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sync mode (builder pattern).
    pub fn with_sync(mut self, sync: SyncMode) -> Self {
        self.sync = sync;
        self
    }

    /// Configuration for tests: no fsync, so temp-dir tests stay fast.
    pub fn for_testing() -> Self {
        StoreConfig {
            sync: SyncMode::Never,
        }
    }
}
