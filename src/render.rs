pub mod colormap;
pub mod svg;

use crate::{
    core::aggregate::HourlyAverage,
    quantity::rate::KilowattHourRate,
    render::colormap::{Normalize, Rgb},
};

/// Bar drawn for a single hour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bar {
    pub hour: u32,
    pub price: KilowattHourRate,

    /// Cheaper hours get longer bars.
    pub length: f64,

    pub color: Rgb,
}

/// Lay the hourly averages out as bars.
#[must_use]
pub fn layout(hourly: &[HourlyAverage]) -> Vec<Bar> {
    let Some(normalize) = Normalize::fit(hourly.iter().map(|average| average.price.0)) else {
        return Vec::new();
    };
    hourly
        .iter()
        .map(|average| Bar {
            hour: average.hour,
            price: average.price,
            length: bar_length(average.price.0, normalize.max),
            color: colormap::red_yellow_green_reversed(normalize.apply(average.price.0)),
        })
        .collect()
}

/// «Savings potential»: the distance to the most expensive hour plus a tenth of it.
#[must_use]
pub fn bar_length(price: f64, max_price: f64) -> f64 {
    (max_price - price) + max_price * 0.1
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn hourly(prices: &[f64]) -> Vec<HourlyAverage> {
        prices
            .iter()
            .zip(0..)
            .map(|(price, hour)| HourlyAverage { hour, price: KilowattHourRate(*price) })
            .collect()
    }

    #[test]
    fn test_bar_length() {
        assert_abs_diff_eq!(bar_length(0.1, 0.1), 0.01);
        assert_abs_diff_eq!(bar_length(0.05, 0.1), 0.06);
    }

    #[test]
    fn test_bar_length_decreases_with_price() {
        let bars = layout(&hourly(&[0.01, 0.02, 0.05, 0.1, 0.2]));
        assert!(bars.windows(2).all(|pair| pair[0].length > pair[1].length));
    }

    #[test]
    fn test_layout_colors() {
        let bars = layout(&hourly(&[0.3, 0.1, 0.2]));
        assert_eq!(bars[0].color, colormap::red_yellow_green_reversed(1.0));
        assert_eq!(bars[1].color, colormap::red_yellow_green_reversed(0.0));
        assert_eq!(bars[2].color, colormap::red_yellow_green_reversed(0.5));
    }

    #[test]
    fn test_layout_empty() {
        assert!(layout(&[]).is_empty());
    }
}
