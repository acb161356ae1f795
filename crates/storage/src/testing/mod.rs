//! Testing utilities for record stores
//!
//! - **Corruption Tester**: damages a record file the way an interrupted
//!   append or swap-delete would, so tests can check what the store does
//!   with the result.
//!
//! # Example
//!
//! ```ignore
//! use ferry_storage::testing::RecordCorruptionTester;
//!
//! let tester = RecordCorruptionTester::new("data/reservations.dat");
//! tester.append_garbage(&[0xFF; 5])?;
//! // The store should read every complete record and stop at the tail
//! ```

mod corruption;

pub use corruption::RecordCorruptionTester;
