//! Lane-capacity ledger
//!
//! Pure functions over a `Sailing` snapshot. A vessel has two lane pools:
//! the low-ceiling lane, usable only by low-roof-lane (LRL) vehicles, and the
//! high-ceiling lane, usable by anything. A vehicle occupies its full length
//! on exactly one lane; there is no splitting.
//!
//! # Placement
//!
//! ```text
//! LowRoofEligible  low lane if it fits, else high lane, else InsufficientSpace
//! HighRoofOnly     high lane if it fits, else InsufficientSpace
//! ```
//!
//! An exact fit (`length == remaining`) is accepted. Lane lengths are `f32`
//! and accumulate rounding error across bookings and cancellations, so
//! every fit and bound check allows `LENGTH_TOLERANCE`, and results are
//! clamped to `[0, capacity]`.

use ferry_core::limits::{LOW_ROOF_MAX_HEIGHT, LOW_ROOF_MAX_LENGTH};
use ferry_core::{Sailing, Vessel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slack for comparing lane lengths, in meters.
///
/// Inputs carry at most one decimal, so one millimeter is far below any
/// real difference and far above accumulated `f32` error.
pub const LENGTH_TOLERANCE: f32 = 1e-3;

fn fits(length: f32, room: f32) -> bool {
    length <= room + LENGTH_TOLERANCE
}

fn debit(remaining: f32, length: f32) -> f32 {
    (remaining - length).max(0.0)
}

fn credit(remaining: f32, length: f32, cap: Option<f32>) -> f32 {
    let value = remaining + length;
    match cap {
        Some(cap) if value > cap && fits(value, cap) => cap,
        _ => value,
    }
}

/// Which lanes a vehicle may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneClass {
    /// Height ≤ 2m and length ≤ 7m: low lane first, high lane as overflow
    LowRoofEligible,
    /// Anything else: high lane only
    HighRoofOnly,
}

impl LaneClass {
    /// Value stored in a reservation's `is_lrl` flag.
    pub fn is_lrl(self) -> bool {
        matches!(self, LaneClass::LowRoofEligible)
    }

    /// Class recorded by a reservation's `is_lrl` flag.
    pub fn from_lrl(is_lrl: bool) -> Self {
        if is_lrl {
            LaneClass::LowRoofEligible
        } else {
            LaneClass::HighRoofOnly
        }
    }
}

/// One of the two lane pools of a sailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Low-ceiling lane
    Low,
    /// High-ceiling lane
    High,
}

/// No lane the vehicle may use has room for it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "{length}m {class:?} vehicle does not fit (low remaining {low_remaining}m, high remaining {high_remaining}m)"
)]
pub struct InsufficientSpace {
    /// Vehicle length
    pub length: f32,
    /// Vehicle class
    pub class: LaneClass,
    /// Low lane length left on the sailing
    pub low_remaining: f32,
    /// High lane length left on the sailing
    pub high_remaining: f32,
}

/// Result of placing or removing a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneChange {
    /// Sailing with updated remaining lengths
    pub sailing: Sailing,
    /// Lane that changed
    pub lane: Lane,
}

/// Lane allocation rules, optionally bounded by the vessel's capacities.
///
/// Bounds only matter for `release`: a low-roof vehicle that overflowed
/// onto the high lane is not recorded as such, so crediting the low lane
/// blindly could push it past the vessel's low lane length.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityLedger {
    low_capacity: Option<f32>,
    high_capacity: Option<f32>,
}

impl CapacityLedger {
    /// Ledger without vessel bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger bounded by `vessel`'s lane lengths.
    pub fn for_vessel(vessel: &Vessel) -> Self {
        CapacityLedger {
            low_capacity: Some(vessel.low_lane_length),
            high_capacity: Some(vessel.high_lane_length),
        }
    }

    /// Classify a vehicle by its dimensions.
    pub fn classify(length: f32, height: f32) -> LaneClass {
        if height <= LOW_ROOF_MAX_HEIGHT && length <= LOW_ROOF_MAX_LENGTH {
            LaneClass::LowRoofEligible
        } else {
            LaneClass::HighRoofOnly
        }
    }

    /// Place a vehicle of `length` on `sailing`.
    pub fn allocate(
        &self,
        sailing: &Sailing,
        length: f32,
        class: LaneClass,
    ) -> Result<LaneChange, InsufficientSpace> {
        let mut updated = sailing.clone();
        let lane = if class == LaneClass::LowRoofEligible
            && fits(length, sailing.low_remaining_length)
        {
            updated.low_remaining_length = debit(sailing.low_remaining_length, length);
            Lane::Low
        } else if fits(length, sailing.high_remaining_length) {
            updated.high_remaining_length = debit(sailing.high_remaining_length, length);
            Lane::High
        } else {
            return Err(InsufficientSpace {
                length,
                class,
                low_remaining: sailing.low_remaining_length,
                high_remaining: sailing.high_remaining_length,
            });
        };
        Ok(LaneChange {
            sailing: updated,
            lane,
        })
    }

    /// Return a vehicle's `length` to `sailing`.
    ///
    /// `class` must come from the reservation's stored `is_lrl` flag; the
    /// lane actually used is not recorded. The length is credited to the
    /// class's own lane (low for low-roof, high otherwise) up to that lane's
    /// bounded capacity, and whatever does not fit is credited to the other
    /// lane, where an overflowed vehicle must have been. Both lanes stay
    /// within `[0, capacity]` and the total is conserved. `lane` is `High`
    /// whenever any length went to the high lane.
    pub fn release(&self, sailing: &Sailing, length: f32, class: LaneClass) -> LaneChange {
        let (own, other) = match class {
            LaneClass::LowRoofEligible => (Lane::Low, Lane::High),
            LaneClass::HighRoofOnly => (Lane::High, Lane::Low),
        };
        let own_remaining = remaining(sailing, own);
        let spill = match self.capacity(own) {
            Some(cap) => {
                let room = (cap - own_remaining).max(0.0);
                if fits(length, room) {
                    0.0
                } else {
                    length - room
                }
            }
            None => 0.0,
        };

        let mut updated = sailing.clone();
        *remaining_mut(&mut updated, own) =
            credit(own_remaining, length - spill, self.capacity(own));
        if spill > 0.0 {
            *remaining_mut(&mut updated, other) =
                credit(remaining(sailing, other), spill, self.capacity(other));
        }

        let lane = if spill > 0.0 { Lane::High } else { own };
        LaneChange {
            sailing: updated,
            lane,
        }
    }

    fn capacity(&self, lane: Lane) -> Option<f32> {
        match lane {
            Lane::Low => self.low_capacity,
            Lane::High => self.high_capacity,
        }
    }
}

fn remaining(sailing: &Sailing, lane: Lane) -> f32 {
    match lane {
        Lane::Low => sailing.low_remaining_length,
        Lane::High => sailing.high_remaining_length,
    }
}

fn remaining_mut(sailing: &mut Sailing, lane: Lane) -> &mut f32 {
    match lane {
        Lane::Low => &mut sailing.low_remaining_length,
        Lane::High => &mut sailing.high_remaining_length,
    }
}
