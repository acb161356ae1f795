//! Storage layer for ferrydb
//!
//! This crate implements the fixed-length record files behind every entity:
//! - RecordStore: open/reset/read-next/write/close over one file of `FixedRecord`s
//! - Swap-delete-and-truncate deletion (`RecordStore::swap_remove`)
//! - Atomic whole-file rewrite via temp file and rename (`RecordStore::retain`)
//! - StoreConfig: sync behavior
//! - FerryPaths: data directory layout
//! - Testing: corruption utilities for crash scenarios

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod paths;
pub mod store;
pub mod testing;

pub use config::{StoreConfig, SyncMode};
pub use error::{Result, StoreError};
pub use paths::FerryPaths;
pub use store::{RecordStore, Records};
