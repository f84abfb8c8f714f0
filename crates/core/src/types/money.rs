//! Money arithmetic helpers.
//!
//! Monetary values cross the wire and the database as plain `f64` (the
//! catalog stores REAL columns); all in-process arithmetic goes through
//! [`Decimal`] so repeated additions never accumulate float error.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Carts totalling this much or more ship free.
const FREE_DELIVERY_THRESHOLD: i64 = 999;

/// Flat delivery fee charged below the threshold.
const DELIVERY_FEE: i64 = 99;

/// Convert a wire/storage amount into a decimal for arithmetic.
///
/// Returns `None` for NaN or infinite inputs.
#[must_use]
pub fn from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
}

/// Convert a decimal amount back to its wire/storage representation.
#[must_use]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Delivery fee for a cart subtotal: totals under 999 add a flat 99.
#[must_use]
pub fn delivery_fee(subtotal: Decimal) -> Decimal {
    if subtotal < Decimal::from(FREE_DELIVERY_THRESHOLD) {
        Decimal::from(DELIVERY_FEE)
    } else {
        Decimal::ZERO
    }
}

/// Final payable amount: subtotal plus any delivery fee.
#[must_use]
pub fn payable(subtotal: Decimal) -> Decimal {
    subtotal + delivery_fee(subtotal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn subtotals_under_threshold_pay_the_fee() {
        assert_eq!(delivery_fee(Decimal::from(900)), Decimal::from(99));
        assert_eq!(payable(Decimal::from(900)), Decimal::from(999));
    }

    #[test]
    fn threshold_and_above_ship_free() {
        assert_eq!(delivery_fee(Decimal::from(999)), Decimal::ZERO);
        assert_eq!(delivery_fee(Decimal::from(1700)), Decimal::ZERO);
        assert_eq!(payable(Decimal::from(1700)), Decimal::from(1700));
    }

    #[test]
    fn f64_round_trip_keeps_catalog_prices_exact() {
        let price = from_f64(450.0).unwrap();
        assert_eq!(price, Decimal::from(450));
        assert!((to_f64(price) - 450.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(from_f64(f64::NAN).is_none());
        assert!(from_f64(f64::INFINITY).is_none());
    }
}
