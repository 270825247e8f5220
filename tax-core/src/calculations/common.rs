//! Money helpers shared by the federal and state engines.
//!
//! Every reported dollar figure in the federal and state engines passes
//! through [`money`] exactly once, at the line where it is reported.
//! Intermediate sums stay unrounded (use [`to_decimal`] to coerce inputs)
//! so that line items keep adding up to their totals.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be read as a dollar amount.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{input}' is not a valid monetary amount")]
pub struct MoneyParseError {
    pub input: String,
}

/// Cent rounding with ties away from zero, always leaving two decimal
/// places. `Decimal::round_dp` alone would round ties to even.
///
/// # Arguments
///
/// * `value` - Any amount, possibly carrying more than two places
///
/// # Returns
///
/// `value` at exactly two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// assert_eq!(round_half_up(dec!(19)).to_string(), "19.00");
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Converts a numeric input to a cent-precise reporting value.
///
/// # Arguments
///
/// * `value` - Anything that converts losslessly into [`Decimal`]
///   (integers and decimals). Binary floating point is not accepted.
///
/// # Returns
///
/// The value rounded as by [`round_half_up`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::money;
///
/// assert_eq!(money(dec!(3070.005)), dec!(3070.01));
/// assert_eq!(money(1500), dec!(1500.00));
/// ```
pub fn money<T: Into<Decimal>>(value: T) -> Decimal {
    round_half_up(value.into())
}

/// Coerces a numeric input to [`Decimal`] without rounding.
pub fn to_decimal<T: Into<Decimal>>(value: T) -> Decimal {
    value.into()
}

/// Parses a user-entered dollar amount such as `"$1,234.50"` or `" -12 "`.
///
/// The result is not rounded.
pub fn parse_money(input: &str) -> Result<Decimal, MoneyParseError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '_')
        .collect();

    Decimal::from_str(&cleaned).map_err(|_| MoneyParseError {
        input: input.to_string(),
    })
}

/// Floors a value at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-250)), dec!(0));
/// assert_eq!(non_negative(dec!(250)), dec!(250));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Counts phaseout steps for `excess` income, where a partial step counts
/// as a full one ("for each $1,000 or fraction thereof").
///
/// Returns zero when there is no excess or the step size is not positive.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::phaseout_steps;
///
/// assert_eq!(phaseout_steps(dec!(1000), dec!(1000)), dec!(1));
/// assert_eq!(phaseout_steps(dec!(1000.01), dec!(1000)), dec!(2));
/// assert_eq!(phaseout_steps(dec!(0), dec!(1000)), dec!(0));
/// ```
pub fn phaseout_steps(
    excess: Decimal,
    step: Decimal,
) -> Decimal {
    if excess <= Decimal::ZERO || step <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (excess / step).ceil()
}

/// Fraction of a phaseout range that `income` has consumed, clamped to
/// `[0, 1]`. A zero-width range is treated as fully phased out once income
/// passes its start.
pub fn phaseout_fraction(
    income: Decimal,
    start: Decimal,
    range: Decimal,
) -> Decimal {
    let excess = income - start;
    if excess <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if range <= Decimal::ZERO {
        return Decimal::ONE;
    }
    (excess / range).min(Decimal::ONE)
}
