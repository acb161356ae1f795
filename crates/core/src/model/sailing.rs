//! Sailing record
//!
//! ```text
//! ┌────────────────┬──────────────────┬──────────────┬───────────────┐
//! │ sailing id (10)│ vessel name (26) │ low f32 (4)  │ high f32 (4)  │
//! └────────────────┴──────────────────┴──────────────┴───────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::limits::{check_text, MAX_SAILING_ID, MAX_VESSEL_NAME};
use crate::record::{ensure_width, get_f32, get_text, put_f32, put_text, FixedRecord};
use crate::{Result, Vessel};

const SAILING_ID: std::ops::Range<usize> = 0..10;
const VESSEL_NAME: std::ops::Range<usize> = 10..36;
const LOW: usize = 36;
const HIGH: usize = 40;

/// One departure of a vessel and the lane length still unallocated on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sailing {
    /// Unique sailing ID in `LLL-DD-HH` form
    pub sailing_id: String,
    /// Name of the vessel making the sailing (not enforced on write)
    pub vessel_name: String,
    /// Remaining low-ceiling lane length (LRL)
    pub low_remaining_length: f32,
    /// Remaining high-ceiling lane length (HRL)
    pub high_remaining_length: f32,
}

impl Sailing {
    /// Create an empty sailing with the full capacity of `vessel`.
    pub fn for_vessel(sailing_id: &str, vessel: &Vessel) -> Result<Self> {
        Self::new(
            sailing_id,
            &vessel.name,
            vessel.low_lane_length,
            vessel.high_lane_length,
        )
    }

    /// Create a sailing with explicit remaining lengths.
    pub fn new(
        sailing_id: &str,
        vessel_name: &str,
        low_remaining_length: f32,
        high_remaining_length: f32,
    ) -> Result<Self> {
        check_text("sailing id", sailing_id, MAX_SAILING_ID)?;
        check_text("vessel name", vessel_name, MAX_VESSEL_NAME)?;
        Ok(Sailing {
            sailing_id: sailing_id.to_string(),
            vessel_name: vessel_name.to_string(),
            low_remaining_length,
            high_remaining_length,
        })
    }

    /// Total unallocated length over both lanes.
    pub fn total_remaining(&self) -> f32 {
        self.low_remaining_length + self.high_remaining_length
    }
}

impl FixedRecord for Sailing {
    const WIDTH: usize = 44;
    const KIND: &'static str = "sailing";

    fn encode_into(&self, buf: &mut [u8]) {
        put_text(&mut buf[SAILING_ID], &self.sailing_id);
        put_text(&mut buf[VESSEL_NAME], &self.vessel_name);
        put_f32(buf, LOW, self.low_remaining_length);
        put_f32(buf, HIGH, self.high_remaining_length);
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        ensure_width::<Self>(buf)?;
        Ok(Sailing {
            sailing_id: get_text(&buf[SAILING_ID]),
            vessel_name: get_text(&buf[VESSEL_NAME]),
            low_remaining_length: get_f32(buf, LOW),
            high_remaining_length: get_f32(buf, HIGH),
        })
    }
}
