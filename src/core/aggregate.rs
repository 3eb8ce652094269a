use average::Mean;
use chrono::{FixedOffset, Timelike};
use itertools::Itertools;
use serde::Serialize;

use crate::{core::point::PricePoint, quantity::rate::KilowattHourRate};

/// Mean price within a local hour-of-day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct HourlyAverage {
    /// Local hour-of-day, `0..=23`.
    pub hour: u32,

    pub price: KilowattHourRate,
}

impl<T> AverageHourly for T where T: ?Sized {}

pub trait AverageHourly {
    /// Group the points by local hour-of-day and average the rescaled prices.
    ///
    /// Only the hours present in the input are returned, ordered by hour.
    #[must_use]
    fn average_hourly(self, utc_offset: FixedOffset) -> Vec<HourlyAverage>
    where
        Self: Sized + IntoIterator<Item = PricePoint>,
    {
        self.into_iter()
            .map(|point| {
                let hour = point.timestamp.with_timezone(&utc_offset).hour();
                (hour, KilowattHourRate::from(point.price))
            })
            .into_group_map()
            .into_iter()
            .sorted_unstable_by_key(|(hour, _)| *hour)
            .map(|(hour, mut prices)| {
                // Summation order must not depend on the input order:
                prices.sort_unstable_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
                let mean: Mean = prices.iter().map(|price| price.0).collect();
                HourlyAverage { hour, price: KilowattHourRate(mean.mean()) }
            })
            .collect()
    }
}
