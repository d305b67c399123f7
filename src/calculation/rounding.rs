//! Monetary rounding and overflow-checked arithmetic.
//!
//! `Decimal` operators panic when a result exceeds 96 bits of mantissa.
//! Every sum, product and quotient built from request data goes through the
//! checked helpers below, which report the offending field instead.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places every monetary output carries.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("416.665").unwrap()), Decimal::from_str("416.67").unwrap());
/// assert_eq!(round_money(Decimal::from_str("128.0530").unwrap()), Decimal::from_str("128.05").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `a + b`, or [`EngineError::InvalidInput`] for `field` on overflow.
pub(crate) fn checked_add(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| EngineError::out_of_range(field))
}

/// `a - b`, or [`EngineError::InvalidInput`] for `field` on overflow.
pub(crate) fn checked_sub(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| EngineError::out_of_range(field))
}

/// `a * b`, or [`EngineError::InvalidInput`] for `field` on overflow.
pub(crate) fn checked_mul(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| EngineError::out_of_range(field))
}

/// `a / b`, or [`EngineError::InvalidInput`] for `field` on overflow.
///
/// Callers rule out zero divisors first and report them as
/// [`EngineError::DivisionByZero`].
pub(crate) fn checked_div(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_div(b).ok_or_else(|| EngineError::out_of_range(field))
}

/// Sums `values`, failing on the first overflow.
pub(crate) fn checked_sum<I>(field: &str, values: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| checked_add(field, total, value))
}

/// `round_money(amount * percent / 100)`, failing on overflow.
pub(crate) fn percent_of(field: &str, amount: Decimal, percent: Decimal) -> EngineResult<Decimal> {
    let scaled = checked_mul(field, amount, percent)?;
    Ok(round_money(checked_div(field, scaled, Decimal::ONE_HUNDRED)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("2.675")), dec("2.68"));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero_when_negative() {
        assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_money(dec("1024.4239")), dec("1024.42"));
    }

    #[test]
    fn test_repeating_fraction() {
        assert_eq!(round_money(dec("5000") / dec("12")), dec("416.67"));
    }

    #[test]
    fn test_checked_helpers_pass_through_in_range_values() {
        assert_eq!(checked_add("a", dec("1.5"), dec("2.5")).unwrap(), dec("4"));
        assert_eq!(checked_sub("a", dec("1.5"), dec("2.5")).unwrap(), dec("-1"));
        assert_eq!(checked_mul("a", dec("1.5"), dec("4")).unwrap(), dec("6"));
        assert_eq!(checked_div("a", dec("9"), dec("4")).unwrap(), dec("2.25"));
        assert_eq!(checked_sum("a", [dec("1"), dec("2"), dec("3")]).unwrap(), dec("6"));
        assert_eq!(percent_of("a", dec("4759.70"), dec("20")).unwrap(), dec("951.94"));
    }

    #[test]
    fn test_overflow_names_the_field() {
        match checked_mul("yearly_cost", Decimal::MAX, dec("12")) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "yearly_cost");
                assert_eq!(message, "amount out of range");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!(checked_add("a", Decimal::MAX, Decimal::ONE).is_err());
        assert!(checked_sub("a", Decimal::MIN, Decimal::ONE).is_err());
        assert!(checked_sum("a", [Decimal::MAX, Decimal::MAX]).is_err());
        assert!(percent_of("a", Decimal::MAX, dec("50")).is_err());
    }
}
