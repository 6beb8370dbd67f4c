use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::LandCategory;

/// Input rejected before any computation runs.
///
/// This is the only failure a calculator reports: once input is valid,
/// table lookups fall back instead of failing.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidInput {
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: Decimal },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    /// The value is in range on its own but the tax on it does not fit a
    /// `Decimal`.
    #[error("{field} {value} is too large to compute a tax for")]
    TooLarge { field: &'static str, value: Decimal },

    #[error("manufacture year {year} is outside {earliest}..={latest}")]
    YearOutOfRange {
        year: i32,
        earliest: i32,
        latest: i32,
    },

    #[error("unknown {kind} code '{code}'")]
    UnknownCode { kind: &'static str, code: String },

    #[error("purpose '{purpose}' is not valid for {category} land")]
    PurposeNotInCategory {
        category: LandCategory,
        purpose: String,
    },
}

pub(crate) fn require_positive(
    field: &'static str,
    value: Decimal,
) -> Result<(), InvalidInput> {
    if value <= Decimal::ZERO {
        return Err(InvalidInput::NotPositive { field, value });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), InvalidInput> {
    if value < Decimal::ZERO {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(())
}

/// `value * factor`, or [`InvalidInput::TooLarge`] naming `field` when the
/// product overflows.
pub(crate) fn checked_product(
    field: &'static str,
    value: Decimal,
    factor: Decimal,
) -> Result<Decimal, InvalidInput> {
    value
        .checked_mul(factor)
        .ok_or(InvalidInput::TooLarge { field, value })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn checked_product_multiplies() {
        assert_eq!(checked_product("area", dec!(2.5), dec!(4)), Ok(dec!(10.0)));
    }

    #[test]
    fn checked_product_reports_overflow() {
        assert_eq!(
            checked_product("area", Decimal::MAX, dec!(2)),
            Err(InvalidInput::TooLarge {
                field: "area",
                value: Decimal::MAX,
            })
        );
    }
}
