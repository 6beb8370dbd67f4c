//! Property tax, by assessed value or by area.
//!
//! The two methods are independent and carry different benefit rules:
//!
//! - **By value**: progressive brackets on the assessed value. For a value
//!   in bracket *i*, tax = base of *i* + (value − upper of *i − 1*) × rate
//!   of *i*. The 2026 first bracket (up to and including 52 000 000 ₸) has
//!   a zero rate, so values in it are exempt. Eligible owners have any
//!   positive tax waived entirely.
//! - **By area**: taxable m² × city tier rate × property type multiplier.
//!   Eligible owners deduct the tier's benefit area first.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{PropertyAreaInput, PropertyTaxCalculator};
//! use tax_core::schedules::kz_2026;
//! use tax_core::{CityTier, PropertyType};
//!
//! let schedule = kz_2026();
//! let calculator = PropertyTaxCalculator::new(&schedule.property);
//!
//! let result = calculator
//!     .compute_by_area(&PropertyAreaInput {
//!         area: dec!(100),
//!         property_type: PropertyType::Apartment,
//!         city_tier: CityTier::Astana,
//!         has_benefits: true,
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.taxable_base, dec!(35));
//! assert_eq!(result.tax_amount, dec!(8400));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::deduct_allowance;
use super::error::{InvalidInput, checked_product, require_non_negative, require_positive};
use super::resolver::{allowance, locate, resolve};
use crate::models::{
    BenefitApplied, CalculationDetails, CalculationResult, CityTier, PropertyAreaDetails,
    PropertySchedule, PropertyType, PropertyValueDetails,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValueInput {
    /// Tenge; zero is allowed.
    pub assessed_value: Decimal,
    pub has_benefits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAreaInput {
    /// Square metres; must be positive.
    pub area: Decimal,
    pub property_type: PropertyType,
    pub city_tier: CityTier,
    pub has_benefits: bool,
}

/// Either property method, for callers that pick the method at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PropertyTaxInput {
    ByValue(PropertyValueInput),
    ByArea(PropertyAreaInput),
}

#[derive(Debug, Clone)]
pub struct PropertyTaxCalculator<'a> {
    schedule: &'a PropertySchedule,
}

impl<'a> PropertyTaxCalculator<'a> {
    pub fn new(schedule: &'a PropertySchedule) -> Self {
        Self { schedule }
    }

    /// Dispatches to [`Self::compute_by_value`] or [`Self::compute_by_area`].
    ///
    /// # Errors
    ///
    /// Propagates the selected method's [`InvalidInput`].
    pub fn compute(
        &self,
        input: &PropertyTaxInput,
    ) -> Result<CalculationResult, InvalidInput> {
        match input {
            PropertyTaxInput::ByValue(input) => self.compute_by_value(input),
            PropertyTaxInput::ByArea(input) => self.compute_by_area(input),
        }
    }

    /// Computes property tax from the assessed value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Negative`] for a negative assessed value, and
    /// [`InvalidInput::TooLarge`] if the tax on it overflows.
    pub fn compute_by_value(
        &self,
        input: &PropertyValueInput,
    ) -> Result<CalculationResult, InvalidInput> {
        require_non_negative("assessed value", input.assessed_value)?;

        let value = input.assessed_value;
        let brackets = &self.schedule.value_brackets;
        let found = locate(brackets, value);

        let excess = value - found.lower;
        let tax_before_benefit = excess
            .checked_mul(found.bracket.rate)
            .and_then(|tax| tax.checked_add(found.bracket.base_tax))
            .ok_or(InvalidInput::TooLarge {
                field: "assessed value",
                value,
            })?;
        // Only the first bracket can exempt; a zero-rate bracket further up
        // still counts as taxed.
        let exempt = found.index == 0 && tax_before_benefit.is_zero();

        let (tax_amount, benefit) = if input.has_benefits && tax_before_benefit > Decimal::ZERO {
            (
                Decimal::ZERO,
                BenefitApplied::FullExemption {
                    waived_tax: tax_before_benefit,
                },
            )
        } else {
            (tax_before_benefit, BenefitApplied::NotApplied)
        };

        debug!(
            value = %value,
            bracket = found.index,
            exempt,
            tax = %tax_amount,
            "computed property tax by value"
        );

        Ok(CalculationResult {
            tax_amount,
            taxable_base: value,
            applied_rate: found.bracket.rate,
            benefit,
            details: CalculationDetails::PropertyByValue(PropertyValueDetails {
                assessed_value: value,
                bracket_index: found.index,
                bracket_lower: found.lower,
                bracket_upper: found.bracket.upper,
                marginal_rate: found.bracket.rate,
                base_tax: found.bracket.base_tax,
                excess,
                exemption_threshold: brackets.first_threshold(),
                exempt,
                tax_before_benefit,
            }),
        })
    }

    /// Computes property tax from the floor area.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NotPositive`] if the area is zero or negative,
    /// and [`InvalidInput::TooLarge`] if the tax on it overflows.
    pub fn compute_by_area(
        &self,
        input: &PropertyAreaInput,
    ) -> Result<CalculationResult, InvalidInput> {
        require_positive("property area", input.area)?;

        let base_rate = resolve(&self.schedule.area_rates, &input.city_tier);
        let multiplier = resolve(&self.schedule.type_multipliers, &input.property_type);
        let rate = checked_product("property rate", base_rate, multiplier)?;
        checked_product("property area", input.area, rate)?;

        let (taxable_area, benefit) = if input.has_benefits {
            let limit = allowance(&self.schedule.benefit_areas, &input.city_tier);
            let deduction = deduct_allowance(input.area, limit);
            (
                deduction.taxable,
                BenefitApplied::Deduction {
                    allowance: deduction.allowance,
                    deducted: deduction.deducted,
                },
            )
        } else {
            (input.area, BenefitApplied::NotApplied)
        };

        // taxable_area <= area, checked above
        let tax_amount = taxable_area * rate;

        debug!(
            property_type = %input.property_type,
            city_tier = %input.city_tier,
            taxable_area = %taxable_area,
            tax = %tax_amount,
            "computed property tax by area"
        );

        Ok(CalculationResult {
            tax_amount,
            taxable_base: taxable_area,
            applied_rate: rate,
            benefit,
            details: CalculationDetails::PropertyByArea(PropertyAreaDetails {
                property_type: input.property_type,
                city_tier: input.city_tier,
                total_area: input.area,
                base_rate,
                multiplier,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BracketSchedule, TaxBracket};
    use crate::schedules::kz_2026;

    fn by_value(
        assessed_value: Decimal,
        has_benefits: bool,
    ) -> PropertyValueInput {
        PropertyValueInput {
            assessed_value,
            has_benefits,
        }
    }

    fn by_area(
        area: Decimal,
        property_type: PropertyType,
        city_tier: CityTier,
        has_benefits: bool,
    ) -> PropertyAreaInput {
        PropertyAreaInput {
            area,
            property_type,
            city_tier,
            has_benefits,
        }
    }

    // =========================================================================
    // compute_by_value tests
    // =========================================================================

    #[test]
    fn value_at_threshold_is_exempt() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(52000000), false))
            .unwrap();

        assert_eq!(result.tax_amount, Decimal::ZERO);
        let CalculationDetails::PropertyByValue(details) = result.details else {
            panic!("expected property value details");
        };
        assert!(details.exempt);
        assert_eq!(details.bracket_index, 0);
        assert_eq!(details.exemption_threshold, Some(dec!(52000000)));
    }

    #[test]
    fn value_one_above_threshold_enters_second_bracket() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(52000001), false))
            .unwrap();

        assert_eq!(result.tax_amount, dec!(1) * dec!(0.0005));
        assert_eq!(result.applied_rate, dec!(0.0005));
    }

    #[test]
    fn value_in_second_bracket() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(80000000), false))
            .unwrap();

        // (80M - 52M) × 0.05%
        assert_eq!(result.tax_amount, dec!(14000));
    }

    #[test]
    fn value_at_second_boundary_stays_in_second_bracket() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(104000000), false))
            .unwrap();

        assert_eq!(result.tax_amount, dec!(26000));
    }

    #[test]
    fn value_in_third_bracket_adds_base() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(130000000), false))
            .unwrap();

        // 26 000 + 26M × 0.07%
        assert_eq!(result.tax_amount, dec!(44200));
    }

    #[test]
    fn value_in_top_bracket() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(200000000), false))
            .unwrap();

        // 62 400 + 44M × 0.1%
        assert_eq!(result.tax_amount, dec!(106400));
        let CalculationDetails::PropertyByValue(details) = result.details else {
            panic!("expected property value details");
        };
        assert_eq!(details.bracket_index, 3);
        assert_eq!(details.bracket_lower, dec!(156000000));
        assert_eq!(details.bracket_upper, None);
        assert_eq!(details.excess, dec!(44000000));
        assert!(!details.exempt);
    }

    #[test]
    fn value_is_continuous_across_boundaries() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        for boundary in [dec!(104000000), dec!(156000000)] {
            let at = calculator
                .compute_by_value(&by_value(boundary, false))
                .unwrap()
                .tax_amount;
            let above = calculator
                .compute_by_value(&by_value(boundary + dec!(1), false))
                .unwrap()
                .tax_amount;

            assert!(above > at, "tax must grow past {boundary}");
            assert!(above - at < dec!(0.01), "tax must not jump at {boundary}");
        }
    }

    #[test]
    fn benefit_waives_positive_value_tax() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(200000000), true))
            .unwrap();

        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(
            result.benefit,
            BenefitApplied::FullExemption {
                waived_tax: dec!(106400),
            }
        );
    }

    #[test]
    fn benefit_on_exempt_value_is_not_applied() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_value(&by_value(dec!(30000000), true))
            .unwrap();

        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.benefit, BenefitApplied::NotApplied);
    }

    #[test]
    fn zero_value_is_accepted() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator.compute_by_value(&by_value(Decimal::ZERO, false));

        assert_eq!(result.map(|r| r.tax_amount), Ok(Decimal::ZERO));
    }

    #[test]
    fn negative_value_is_rejected() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let err = calculator
            .compute_by_value(&by_value(dec!(-1), false))
            .unwrap_err();

        assert_eq!(
            err,
            InvalidInput::Negative {
                field: "assessed value",
                value: dec!(-1),
            }
        );
    }

    #[test]
    fn taxed_first_bracket_is_not_exempt() {
        let mut schedule = kz_2026().property;
        schedule.value_brackets = BracketSchedule::new(vec![
            TaxBracket::bounded(dec!(52000000), dec!(0.0001), dec!(0)),
            TaxBracket::unbounded(dec!(0.001), dec!(5200)),
        ])
        .unwrap();
        let calculator = PropertyTaxCalculator::new(&schedule);

        let result = calculator
            .compute_by_value(&by_value(dec!(10000000), false))
            .unwrap();

        assert_eq!(result.tax_amount, dec!(1000));
        assert_eq!(result.applied_rate, dec!(0.0001));
        let CalculationDetails::PropertyByValue(details) = result.details else {
            panic!("expected property value details");
        };
        assert_eq!(details.bracket_index, 0);
        assert!(!details.exempt);
        assert_eq!(details.tax_before_benefit, dec!(1000));
    }

    #[test]
    fn taxed_first_bracket_is_waived_by_benefit() {
        let mut schedule = kz_2026().property;
        schedule.value_brackets = BracketSchedule::new(vec![
            TaxBracket::bounded(dec!(52000000), dec!(0.0001), dec!(0)),
            TaxBracket::unbounded(dec!(0.001), dec!(5200)),
        ])
        .unwrap();
        let calculator = PropertyTaxCalculator::new(&schedule);

        let result = calculator
            .compute_by_value(&by_value(dec!(10000000), true))
            .unwrap();

        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(
            result.benefit,
            BenefitApplied::FullExemption {
                waived_tax: dec!(1000),
            }
        );
    }

    #[test]
    fn value_whose_tax_overflows_is_rejected() {
        let mut schedule = kz_2026().property;
        schedule.value_brackets = BracketSchedule::new(vec![
            TaxBracket::bounded(dec!(1000), dec!(0), dec!(0)),
            TaxBracket::unbounded(dec!(2), dec!(0)),
        ])
        .unwrap();
        let calculator = PropertyTaxCalculator::new(&schedule);

        let err = calculator
            .compute_by_value(&by_value(Decimal::MAX, false))
            .unwrap_err();

        assert_eq!(
            err,
            InvalidInput::TooLarge {
                field: "assessed value",
                value: Decimal::MAX,
            }
        );
    }

    #[test]
    fn top_bracket_handles_largest_value() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator.compute_by_value(&by_value(Decimal::MAX, false));

        assert!(result.is_ok_and(|r| r.tax_amount > Decimal::ZERO));
    }

    // =========================================================================
    // compute_by_area tests
    // =========================================================================

    #[test]
    fn apartment_in_astana_without_benefits() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_area(&by_area(
                dec!(100),
                PropertyType::Apartment,
                CityTier::Astana,
                false,
            ))
            .unwrap();

        assert_eq!(result.tax_amount, dec!(24000));
        assert_eq!(result.benefit, BenefitApplied::NotApplied);
        assert_eq!(
            result.details,
            CalculationDetails::PropertyByArea(PropertyAreaDetails {
                property_type: PropertyType::Apartment,
                city_tier: CityTier::Astana,
                total_area: dec!(100),
                base_rate: dec!(240),
                multiplier: dec!(1.0),
            })
        );
    }

    #[test]
    fn apartment_in_astana_with_benefits() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_area(&by_area(
                dec!(100),
                PropertyType::Apartment,
                CityTier::Astana,
                true,
            ))
            .unwrap();

        assert_eq!(result.taxable_base, dec!(35));
        assert_eq!(result.tax_amount, dec!(8400));
        assert_eq!(
            result.benefit,
            BenefitApplied::Deduction {
                allowance: dec!(65),
                deducted: dec!(65),
            }
        );
    }

    #[test]
    fn house_multiplier_applies() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_area(&by_area(
                dec!(150),
                PropertyType::House,
                CityTier::Regional,
                false,
            ))
            .unwrap();

        // 140 × 1.3 = 182 ₸/m²
        assert_eq!(result.applied_rate, dec!(182));
        assert_eq!(result.tax_amount, dec!(27300));
    }

    #[test]
    fn garage_benefit_covering_area_yields_zero() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_area(&by_area(
                dec!(24),
                PropertyType::Garage,
                CityTier::Rural,
                true,
            ))
            .unwrap();

        assert_eq!(result.taxable_base, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(
            result.benefit,
            BenefitApplied::Deduction {
                allowance: dec!(150),
                deducted: dec!(24),
            }
        );
    }

    #[test]
    fn missing_tier_falls_back_to_default_rate() {
        let mut schedule = kz_2026();
        schedule.property.area_rates = crate::models::RateTable::new(Some(dec!(55)));
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let result = calculator
            .compute_by_area(&by_area(
                dec!(10),
                PropertyType::Dacha,
                CityTier::Almaty,
                false,
            ))
            .unwrap();

        // 55 × 0.75 × 10
        assert_eq!(result.tax_amount, dec!(412.5));
    }

    #[test]
    fn zero_area_is_rejected() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        let err = calculator
            .compute_by_area(&by_area(
                Decimal::ZERO,
                PropertyType::Apartment,
                CityTier::District,
                false,
            ))
            .unwrap_err();

        assert_eq!(
            err,
            InvalidInput::NotPositive {
                field: "property area",
                value: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn area_whose_tax_overflows_is_rejected() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);

        for has_benefits in [false, true] {
            let err = calculator
                .compute_by_area(&by_area(
                    Decimal::MAX,
                    PropertyType::House,
                    CityTier::Astana,
                    has_benefits,
                ))
                .unwrap_err();

            assert_eq!(
                err,
                InvalidInput::TooLarge {
                    field: "property area",
                    value: Decimal::MAX,
                }
            );
        }
    }

    // =========================================================================
    // compute dispatch tests
    // =========================================================================

    #[test]
    fn compute_dispatches_on_method() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);
        let value = by_value(dec!(80000000), false);
        let area = by_area(dec!(60), PropertyType::Apartment, CityTier::Shymkent, false);

        assert_eq!(
            calculator.compute(&PropertyTaxInput::ByValue(value)),
            calculator.compute_by_value(&value)
        );
        assert_eq!(
            calculator.compute(&PropertyTaxInput::ByArea(area)),
            calculator.compute_by_area(&area)
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let schedule = kz_2026();
        let calculator = PropertyTaxCalculator::new(&schedule.property);
        let input = PropertyTaxInput::ByArea(by_area(
            dec!(87.4),
            PropertyType::House,
            CityTier::Almaty,
            true,
        ));

        assert_eq!(calculator.compute(&input), calculator.compute(&input));
    }
}
