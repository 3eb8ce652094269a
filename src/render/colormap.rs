//! Diverging red-yellow-green colormap, as in [ColorBrewer](https://colorbrewer2.org).

use itertools::Itertools;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |from: u8, to: u8| {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
        };
        Self(channel(self.0, other.0), channel(self.1, other.1), channel(self.2, other.2))
    }
}

impl From<Rgb> for plotters::style::RGBColor {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Self(r, g, b)
    }
}

impl From<Rgb> for comfy_table::Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Self::Rgb { r, g, b }
    }
}

/// From red to green.
const RED_YELLOW_GREEN: [Rgb; 11] = [
    Rgb(0xA5, 0x00, 0x26),
    Rgb(0xD7, 0x30, 0x27),
    Rgb(0xF4, 0x6D, 0x43),
    Rgb(0xFD, 0xAE, 0x61),
    Rgb(0xFE, 0xE0, 0x8B),
    Rgb(0xFF, 0xFF, 0xBF),
    Rgb(0xD9, 0xEF, 0x8B),
    Rgb(0xA6, 0xD9, 0x6A),
    Rgb(0x66, 0xBD, 0x63),
    Rgb(0x1A, 0x98, 0x50),
    Rgb(0x00, 0x68, 0x37),
];

/// Map `0.0` to green and `1.0` to red.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn red_yellow_green_reversed(value: f64) -> Rgb {
    let n_segments = RED_YELLOW_GREEN.len() - 1;
    let position = (1.0 - value.clamp(0.0, 1.0)) * n_segments as f64;
    let index = (position.floor() as usize).min(n_segments - 1);
    RED_YELLOW_GREEN[index].lerp(RED_YELLOW_GREEN[index + 1], position - index as f64)
}

/// Linear normalization of values onto `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalize {
    pub min: f64,
    pub max: f64,
}

impl Normalize {
    /// Fit to the observed range, `None` when there are no values.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .minmax_by(f64::total_cmp)
            .into_option()
            .map(|(min, max)| Self { min, max })
    }

    /// Degenerate range maps everything onto zero.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_red_yellow_green_reversed() {
        assert_eq!(red_yellow_green_reversed(0.0), Rgb(0x00, 0x68, 0x37));
        assert_eq!(red_yellow_green_reversed(0.5), Rgb(0xFF, 0xFF, 0xBF));
        assert_eq!(red_yellow_green_reversed(1.0), Rgb(0xA5, 0x00, 0x26));
    }

    #[test]
    fn test_red_yellow_green_reversed_interpolates() {
        assert_eq!(red_yellow_green_reversed(0.95), Rgb(0xBE, 0x18, 0x27));
    }

    #[test]
    fn test_red_yellow_green_reversed_clamps() {
        assert_eq!(red_yellow_green_reversed(-1.0), red_yellow_green_reversed(0.0));
        assert_eq!(red_yellow_green_reversed(2.0), red_yellow_green_reversed(1.0));
    }

    #[test]
    fn test_normalize() {
        let normalize = Normalize::fit([0.2, 0.1, 0.3]).unwrap();
        assert_abs_diff_eq!(normalize.min, 0.1);
        assert_abs_diff_eq!(normalize.max, 0.3);
        assert_abs_diff_eq!(normalize.apply(0.2), 0.5);
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_abs_diff_eq!(Normalize::fit([0.1, 0.1]).unwrap().apply(0.1), 0.0);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(Normalize::fit([]).is_none());
    }
}
