// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Numeric policy shared by the calculator and the aggregator.
//!
//! Emission values are kept unrounded while they are being combined and are
//! rounded to two decimals only when they leave the core (stored record
//! totals, API responses).

/// Scale applied to the hundredths value before the final rounding step.
///
/// Snapping to 1e-6 hundredths removes binary representation error such as
/// `1.005` being stored as `1.00499999999999989...`, so decimal half-way
/// cases round the way they read.
const HALF_WAY_SNAP: f64 = 1e6;

/// From here on an f64 has no fractional hundredths left to round.
const NO_FRACTION_ABOVE: f64 = 1e13;

/// Round a kg CO₂e value to two decimals, half away from zero.
///
/// `round_kg(1.005) == 1.01`, `round_kg(2.675) == 2.68`,
/// `round_kg(0.125) == 0.13`, `round_kg(0.124) == 0.12`.
///
/// Values too large to carry hundredths, and non-finite values, are returned
/// unchanged.
pub fn round_kg(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= NO_FRACTION_ABOVE {
        return value;
    }
    let hundredths = value * 100.0;
    let snapped = (hundredths * HALF_WAY_SNAP).round() / HALF_WAY_SNAP;
    snapped.round() / 100.0
}

/// Compensated (Neumaier) running sum.
///
/// Totals over long logs stay within one ulp of the exact sum instead of
/// drifting with every addition.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    /// Unrounded total.
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_kg(0.125), 0.13);
        assert_eq!(round_kg(0.124), 0.12);
        assert_eq!(round_kg(0.135), 0.14);
        assert_eq!(round_kg(11.345), 11.35);
    }

    #[test]
    fn test_round_decimal_half_way_despite_binary_repr() {
        // Both literals sit just below the half-way point in binary.
        assert_eq!(round_kg(1.005), 1.01);
        assert_eq!(round_kg(2.675), 2.68);
    }

    #[test]
    fn test_round_keeps_exact_values() {
        assert_eq!(round_kg(0.0), 0.0);
        assert_eq!(round_kg(0.8), 0.8);
        assert_eq!(round_kg(11.35), 11.35);
        assert_eq!(round_kg(2.1000000000000005), 2.1);
    }

    #[test]
    fn test_round_large_magnitudes_do_not_overflow() {
        assert_eq!(round_kg(1e305), 1e305);
        assert_eq!(round_kg(f64::MAX / 10.0), f64::MAX / 10.0);
        assert_eq!(round_kg(7_110_000_002.5), 7_110_000_002.5);
        assert_eq!(round_kg(123_456_789.125), 123_456_789.13);
        assert!(round_kg(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_compensated_sum_recovers_lost_terms() {
        let values = [1.0, 1e100, 1.0, -1e100];

        let naive: f64 = values.iter().sum();
        let compensated: CompensatedSum = values.iter().copied().collect();

        assert_eq!(naive, 0.0);
        assert_eq!(compensated.value(), 2.0);
    }

    #[test]
    fn test_compensated_sum_of_tenths() {
        let sum: CompensatedSum = std::iter::repeat(0.1).take(10).collect();
        assert_eq!(round_kg(sum.value()), 1.0);
    }

    #[test]
    fn test_empty_sum_is_zero() {
        assert_eq!(CompensatedSum::new().value(), 0.0);
    }
}
