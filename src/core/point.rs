use chrono::{DateTime, Utc};

use crate::quantity::rate::MegawattHourRate;

/// Single sample of a published price series.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: MegawattHourRate,
}
