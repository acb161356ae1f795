//! Vehicle record
//!
//! ```text
//! ┌──────────────┬─────────────┬─────────┬────────────────┬────────────────┐
//! │ licence (11) │ phone (15)  │ pad (2) │ height f32 (4) │ length f32 (4) │
//! └──────────────┴─────────────┴─────────┴────────────────┴────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::limits::{check_text, MAX_LICENCE, MAX_PHONE};
use crate::record::{ensure_width, get_f32, get_text, put_f32, put_text, FixedRecord};
use crate::Result;

const LICENCE: std::ops::Range<usize> = 0..11;
const PHONE: std::ops::Range<usize> = 11..26;
const HEIGHT: usize = 28;
const LENGTH: usize = 32;

/// Details the console collects for a licence plate seen for the first time.
///
/// Values arrive pre-validated against the console bounds in
/// [`crate::limits`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// Contact phone number
    pub phone: String,
    /// Vehicle length in meters
    pub length: f32,
    /// Vehicle height in meters
    pub height: f32,
}

impl VehicleDetails {
    /// Bundle vehicle details.
    pub fn new(phone: impl Into<String>, length: f32, height: f32) -> Self {
        VehicleDetails {
            phone: phone.into(),
            length,
            height,
        }
    }
}

/// A vehicle keyed by licence plate. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique licence plate
    pub licence: String,
    /// Contact phone number
    pub phone: String,
    /// Length in meters
    pub length: f32,
    /// Height in meters
    pub height: f32,
}

impl Vehicle {
    /// Create a vehicle record from a licence and console-supplied details.
    pub fn new(licence: &str, details: &VehicleDetails) -> Result<Self> {
        check_text("licence", licence, MAX_LICENCE)?;
        check_text("phone", &details.phone, MAX_PHONE)?;
        Ok(Vehicle {
            licence: licence.to_string(),
            phone: details.phone.clone(),
            length: details.length,
            height: details.height,
        })
    }
}

impl FixedRecord for Vehicle {
    const WIDTH: usize = 36;
    const KIND: &'static str = "vehicle";

    fn encode_into(&self, buf: &mut [u8]) {
        put_text(&mut buf[LICENCE], &self.licence);
        put_text(&mut buf[PHONE], &self.phone);
        put_f32(buf, HEIGHT, self.height);
        put_f32(buf, LENGTH, self.length);
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        ensure_width::<Self>(buf)?;
        Ok(Vehicle {
            licence: get_text(&buf[LICENCE]),
            phone: get_text(&buf[PHONE]),
            length: get_f32(buf, LENGTH),
            height: get_f32(buf, HEIGHT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordError;

    #[test]
    fn test_layout_offsets() {
        let vehicle = Vehicle::new("XYZ123", &VehicleDetails::new("604-555-0199", 5.0, 1.5)).unwrap();
        let bytes = vehicle.to_bytes();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..7], b"XYZ123\0");
        assert_eq!(&bytes[11..24], b"604-555-0199\0");
        assert_eq!(get_f32(&bytes, HEIGHT), 1.5);
        assert_eq!(get_f32(&bytes, LENGTH), 5.0);
        assert_eq!(Vehicle::decode(&bytes).unwrap(), vehicle);
    }

    #[test]
    fn test_licence_and_phone_limits() {
        let details = VehicleDetails::new("1".repeat(14), 5.0, 1.5);
        assert!(Vehicle::new("ABCDEFGHIJ", &details).is_ok());
        assert!(matches!(
            Vehicle::new("ABCDEFGHIJK", &details),
            Err(RecordError::FieldTooLong { field: "licence", .. })
        ));

        let long_phone = VehicleDetails::new("1".repeat(15), 5.0, 1.5);
        assert!(matches!(
            Vehicle::new("ABC", &long_phone),
            Err(RecordError::FieldTooLong { field: "phone", .. })
        ));
    }
}
