//! Decimal rounding helpers
//!
//! Values go through `rust_decimal` so that a figure such as `1.005`
//! rounds to `1.01` rather than falling victim to binary representation
//! error.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `precision` decimal places.
///
/// Values `Decimal` cannot represent (non-finite or out of range) are
/// returned unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Round half away from zero to the nearest integer
pub fn round(value: f64) -> f64 {
    round_to(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(0.6, 2), 0.6);
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.235, 2), 1.24);
    }

    #[test]
    fn test_round_avoids_binary_error() {
        // 1.005 * 100 == 100.49999999999999
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(2.675, 2), 2.68);
    }

    #[test]
    fn test_round_cost_products() {
        // minutes * rate at each default rate
        assert_eq!(round_to(75.0 * 0.008, 2), 0.6);
        assert_eq!(round_to(67.0 * 0.08, 2), 5.36);
        assert_eq!(round_to(1234.0 * 0.016, 2), 19.74);
    }

    #[test]
    fn test_round_integer() {
        assert_eq!(round(74.5), 75.0);
        assert_eq!(round(74.49), 74.0);
        assert_eq!(round(0.0), 0.0);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round(f64::INFINITY).is_infinite());
        assert!(round_to(f64::NAN, 2).is_nan());
    }
}
