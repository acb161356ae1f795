//! Vessel record
//!
//! ```text
//! ┌────────────────┬─────────┬───────────────┬──────────────┐
//! │ name (26)      │ pad (2) │ high f32 (4)  │ low f32 (4)  │
//! └────────────────┴─────────┴───────────────┴──────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::limits::{check_positive, check_text, MAX_VESSEL_NAME};
use crate::record::{ensure_width, get_f32, get_text, put_f32, put_text, FixedRecord};
use crate::Result;

const NAME: std::ops::Range<usize> = 0..26;
const HIGH: usize = 28;
const LOW: usize = 32;

/// A vessel and its lane capacities in meters.
///
/// Immutable once written; the core never deletes vessels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    /// Unique vessel name
    pub name: String,
    /// High-ceiling lane length (HCLL)
    pub high_lane_length: f32,
    /// Low-ceiling lane length (LCLL)
    pub low_lane_length: f32,
}

impl Vessel {
    /// Create a vessel, rejecting names longer than the record allows and
    /// lane lengths that are not positive.
    pub fn new(name: &str, low_lane_length: f32, high_lane_length: f32) -> Result<Self> {
        check_text("vessel name", name, MAX_VESSEL_NAME)?;
        check_positive("low lane length", low_lane_length)?;
        check_positive("high lane length", high_lane_length)?;
        Ok(Vessel {
            name: name.to_string(),
            high_lane_length,
            low_lane_length,
        })
    }

    /// Combined lane length regardless of ceiling.
    pub fn total_lane_length(&self) -> f32 {
        self.high_lane_length + self.low_lane_length
    }
}

impl FixedRecord for Vessel {
    const WIDTH: usize = 36;
    const KIND: &'static str = "vessel";

    fn encode_into(&self, buf: &mut [u8]) {
        put_text(&mut buf[NAME], &self.name);
        put_f32(buf, HIGH, self.high_lane_length);
        put_f32(buf, LOW, self.low_lane_length);
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        ensure_width::<Self>(buf)?;
        Ok(Vessel {
            name: get_text(&buf[NAME]),
            high_lane_length: get_f32(buf, HIGH),
            low_lane_length: get_f32(buf, LOW),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordError;

    #[test]
    fn test_layout_offsets() {
        let vessel = Vessel::new("Spirit", 100.0, 200.0).unwrap();
        let bytes = vessel.to_bytes();
        assert_eq!(bytes.len(), Vessel::WIDTH);
        assert_eq!(&bytes[..7], b"Spirit\0");
        assert_eq!(get_f32(&bytes, HIGH), 200.0);
        assert_eq!(get_f32(&bytes, LOW), 100.0);
    }

    #[test]
    fn test_decode_restores_fields() {
        let vessel = Vessel::new("Queen of Cowichan", 120.5, 310.0).unwrap();
        assert_eq!(Vessel::decode(&vessel.to_bytes()).unwrap(), vessel);
    }

    #[test]
    fn test_name_limit() {
        assert!(Vessel::new(&"V".repeat(25), 1.0, 1.0).is_ok());
        assert!(matches!(
            Vessel::new(&"V".repeat(26), 1.0, 1.0),
            Err(RecordError::FieldTooLong { max: 25, .. })
        ));
    }

    #[test]
    fn test_lane_lengths_must_be_positive() {
        assert!(matches!(
            Vessel::new("Spirit", 0.0, 200.0),
            Err(RecordError::NonPositiveLength { field: "low lane length" })
        ));
        assert!(matches!(
            Vessel::new("Spirit", 100.0, -1.0),
            Err(RecordError::NonPositiveLength { field: "high lane length" })
        ));
    }

    #[test]
    fn test_total_lane_length() {
        let vessel = Vessel::new("Spirit", 100.0, 200.0).unwrap();
        assert_eq!(vessel.total_lane_length(), 300.0);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert!(matches!(
            Vessel::decode(&[0u8; 20]),
            Err(RecordError::ShortBuffer { expected: 36, actual: 20, .. })
        ));
    }
}
