use serde::Serialize;

/// Euro per megawatt-hour, as published by the exchange.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, derive_more::Debug, derive_more::Display)]
#[debug("{_0:.2}€/MWh")]
#[display("{_0:.2} €/MWh")]
#[must_use]
pub struct MegawattHourRate(pub f64);

/// Euro per kilowatt-hour.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, derive_more::Debug, derive_more::Display)]
#[debug("{_0:.4}€/kWh")]
#[display("{_0:.4} €/kWh")]
#[must_use]
pub struct KilowattHourRate(pub f64);

impl KilowattHourRate {
    /// Round the rate to 4 decimal places, that is a hundredth of a cent, ties to even.
    pub fn round_to_basis_points(self) -> Self {
        Self((self.0 * 10_000.0).round_ties_even() / 10_000.0)
    }
}

impl From<MegawattHourRate> for KilowattHourRate {
    /// Rescale and round to 4 decimals.
    fn from(rate: MegawattHourRate) -> Self {
        Self(rate.0 / 1000.0).round_to_basis_points()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_megawatt_hour_rate() {
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(50.0)).0, 0.05);
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(123.456_78)).0, 0.1235);
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(-12.34)).0, -0.0123);
    }

    #[test]
    fn test_from_megawatt_hour_rate_rounds_ties_to_even() {
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(0.25)).0, 0.0002);
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(0.45)).0, 0.0004);
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(0.05)).0, 0.0);
        assert_abs_diff_eq!(KilowattHourRate::from(MegawattHourRate(-0.25)).0, -0.0002);
    }

    #[test]
    fn test_from_megawatt_hour_rate_is_monotonic() {
        let rates = [-50.0, -0.04, 0.0, 0.049, 0.051, 87.65, 87.66, 1000.0];
        assert!(
            rates
                .into_iter()
                .map(|rate| KilowattHourRate::from(MegawattHourRate(rate)).0)
                .is_sorted()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHourRate(0.1).to_string(), "0.1000 €/kWh");
        assert_eq!(MegawattHourRate(87.654).to_string(), "87.65 €/MWh");
        assert_eq!(format!("{:?}", KilowattHourRate(0.1)), "0.1000€/kWh");
    }
}
