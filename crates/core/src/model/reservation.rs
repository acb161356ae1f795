//! Reservation record
//!
//! ```text
//! ┌────────────────┬──────────────┬──────────────┬────────────┐
//! │ sailing id (10)│ licence (11) │ on board (1) │ is LRL (1) │
//! └────────────────┴──────────────┴──────────────┴────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::limits::{check_text, MAX_LICENCE, MAX_SAILING_ID};
use crate::record::{ensure_width, get_bool, get_text, put_bool, put_text, FixedRecord};
use crate::Result;

const SAILING_ID: std::ops::Range<usize> = 0..10;
const LICENCE: std::ops::Range<usize> = 10..21;
const ON_BOARD: usize = 21;
const IS_LRL: usize = 22;

/// A booking of one vehicle on one sailing.
///
/// `is_lrl` is fixed when the reservation is created and decides which lane
/// is credited when it is cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Sailing the vehicle is booked on
    pub sailing_id: String,
    /// Licence of the booked vehicle
    pub licence: String,
    /// Set once the vehicle has checked in
    pub on_board: bool,
    /// Vehicle qualified for the low-roof lane when booked
    pub is_lrl: bool,
}

impl Reservation {
    /// Create a reservation that has not checked in yet.
    pub fn new(sailing_id: &str, licence: &str, is_lrl: bool) -> Result<Self> {
        check_text("sailing id", sailing_id, MAX_SAILING_ID)?;
        check_text("licence", licence, MAX_LICENCE)?;
        Ok(Reservation {
            sailing_id: sailing_id.to_string(),
            licence: licence.to_string(),
            on_board: false,
            is_lrl,
        })
    }

    /// True if this is the reservation keyed by (`sailing_id`, `licence`).
    pub fn matches(&self, sailing_id: &str, licence: &str) -> bool {
        self.sailing_id == sailing_id && self.licence == licence
    }
}

impl FixedRecord for Reservation {
    const WIDTH: usize = 23;
    const KIND: &'static str = "reservation";

    fn encode_into(&self, buf: &mut [u8]) {
        put_text(&mut buf[SAILING_ID], &self.sailing_id);
        put_text(&mut buf[LICENCE], &self.licence);
        put_bool(buf, ON_BOARD, self.on_board);
        put_bool(buf, IS_LRL, self.is_lrl);
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        ensure_width::<Self>(buf)?;
        Ok(Reservation {
            sailing_id: get_text(&buf[SAILING_ID]),
            licence: get_text(&buf[LICENCE]),
            on_board: get_bool(buf, ON_BOARD),
            is_lrl: get_bool(buf, IS_LRL),
        })
    }
}
