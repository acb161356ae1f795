//! Field limits and business thresholds
//!
//! Text limits are the usable length of each NUL-terminated buffer in the
//! on-disk layout. They are FROZEN: changing one changes the record width and
//! makes existing data files unreadable.

/// Maximum vessel name length in bytes
pub const MAX_VESSEL_NAME: usize = 25;

/// Maximum sailing ID length in bytes (`LLL-DD-HH`)
pub const MAX_SAILING_ID: usize = 9;

/// Maximum vehicle licence length in bytes
pub const MAX_LICENCE: usize = 10;

/// Maximum phone number length in bytes
pub const MAX_PHONE: usize = 14;

/// Smallest vehicle length the console accepts (meters)
pub const MIN_VEHICLE_LENGTH: f32 = 0.1;

/// Largest vehicle length the console accepts (meters)
pub const MAX_VEHICLE_LENGTH: f32 = 99.9;

/// Smallest vehicle height the console accepts (meters)
pub const MIN_VEHICLE_HEIGHT: f32 = 0.1;

/// Largest vehicle height the console accepts (meters)
pub const MAX_VEHICLE_HEIGHT: f32 = 9.9;

/// A vehicle at or below this height may use the low-roof lane
pub const LOW_ROOF_MAX_HEIGHT: f32 = 2.0;

/// A vehicle at or below this length may use the low-roof lane
pub const LOW_ROOF_MAX_LENGTH: f32 = 7.0;

/// Flat fare for low-roof-lane vehicles
pub const LOW_ROOF_FARE: f32 = 14.0;

/// Fare per meter of length for other vehicles
pub const FARE_PER_LENGTH_METER: f32 = 2.0;

/// Fare per meter of height for other vehicles
pub const FARE_PER_HEIGHT_METER: f32 = 3.0;

/// Check that `value` fits a text field of `max` usable bytes.
pub fn check_text(field: &'static str, value: &str, max: usize) -> crate::Result<()> {
    if value.len() > max {
        return Err(crate::RecordError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// Check that a length in meters is strictly positive.
pub fn check_positive(field: &'static str, value: f32) -> crate::Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(crate::RecordError::NonPositiveLength { field })
    }
}
