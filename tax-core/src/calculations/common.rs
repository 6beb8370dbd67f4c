//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculators,
//! including rounding for display and capped benefit deductions.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to whole tenge, half-up.
///
/// The calculators never round; this is for presenting final amounts.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(14861.0)), dec!(14861));
/// assert_eq!(round_to_whole(dec!(0.5)), dec!(1));
/// assert_eq!(round_to_whole(dec!(1754.49)), dec!(1754));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Result of subtracting a benefit allowance from a taxable base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduction {
    /// The allowance the taxpayer is entitled to.
    pub allowance: Decimal,
    /// The part of the allowance actually used; never more than the base.
    pub deducted: Decimal,
    /// The base remaining after the deduction; never negative.
    pub taxable: Decimal,
}

/// Subtracts `allowance` from `base`, capping the deduction at the base.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::deduct_allowance;
///
/// let d = deduct_allowance(dec!(100), dec!(65));
/// assert_eq!(d.taxable, dec!(35));
///
/// let d = deduct_allowance(dec!(0.2), dec!(0.25));
/// assert_eq!(d.taxable, dec!(0));
/// assert_eq!(d.deducted, dec!(0.2));
/// ```
pub fn deduct_allowance(
    base: Decimal,
    allowance: Decimal,
) -> Deduction {
    let taxable = (base - allowance).max(Decimal::ZERO);
    Deduction {
        allowance,
        deducted: base - taxable,
        taxable,
    }
}
