//! Land tax.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base rate for the category in the region (table default if the region is not listed) |
//! | 2    | Base rate × purpose multiplier |
//! | 3    | With benefits: subtract the urban (0.25 ha) or rural (1 ha) allowance from the area, not below 0 |
//! | 4    | Tax = taxable area × step 2 rate |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{LandTaxCalculator, LandTaxInput};
//! use tax_core::schedules::kz_2026;
//! use tax_core::{AgriculturalPurpose, LandUse, Region};
//!
//! let schedule = kz_2026();
//! let calculator = LandTaxCalculator::new(&schedule.land);
//!
//! let result = calculator
//!     .compute(&LandTaxInput {
//!         land_use: LandUse::Agricultural(AgriculturalPurpose::Arable),
//!         region: Region::Akmola,
//!         area: dec!(10),
//!         has_benefits: true,
//!     })
//!     .unwrap();
//!
//! // 46 ₸/ha on (10 - 1) ha.
//! assert_eq!(result.tax_amount, dec!(414));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::deduct_allowance;
use super::error::{InvalidInput, checked_product, require_positive};
use super::resolver::{allowance, resolve};
use crate::models::{
    BenefitApplied, CalculationDetails, CalculationResult, LandCategory, LandDetails,
    LandSchedule, LandUse, Region,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTaxInput {
    pub land_use: LandUse,
    pub region: Region,
    /// Hectares; must be positive.
    pub area: Decimal,
    pub has_benefits: bool,
}

impl LandTaxInput {
    /// Builds an input from wire codes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] for an unknown category or region code, or a
    /// purpose that does not belong to the category.
    pub fn from_codes(
        category: &str,
        purpose: &str,
        region: &str,
        area: Decimal,
        has_benefits: bool,
    ) -> Result<Self, InvalidInput> {
        let category: LandCategory = category.parse()?;
        Ok(Self {
            land_use: LandUse::from_codes(category, purpose)?,
            region: region.parse()?,
            area,
            has_benefits,
        })
    }
}

/// Per-hectare rate for a land use in a region, before any benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRate {
    pub region_rate: Decimal,
    pub multiplier: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone)]
pub struct LandTaxCalculator<'a> {
    schedule: &'a LandSchedule,
}

impl<'a> LandTaxCalculator<'a> {
    pub fn new(schedule: &'a LandSchedule) -> Self {
        Self { schedule }
    }

    /// Resolves the region rate for the land use's category and applies the
    /// purpose multiplier.
    pub fn effective_rate(
        &self,
        land_use: LandUse,
        region: Region,
    ) -> EffectiveRate {
        let region_rate = self
            .schedule
            .base_rates
            .get(&land_use.category())
            .map_or(Decimal::ZERO, |table| resolve(table, &region));
        let multiplier = self.schedule.multiplier(land_use);

        EffectiveRate {
            region_rate,
            multiplier,
            rate: region_rate * multiplier,
        }
    }

    /// Computes land tax.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NotPositive`] if the area is zero or negative,
    /// and [`InvalidInput::TooLarge`] if the tax on it overflows.
    pub fn compute(
        &self,
        input: &LandTaxInput,
    ) -> Result<CalculationResult, InvalidInput> {
        require_positive("land area", input.area)?;

        let rate = self.effective_rate(input.land_use, input.region);
        let tax_without_benefit = checked_product("land area", input.area, rate.rate)?;
        let locality = input.region.locality();

        let (taxable_area, benefit) = if input.has_benefits {
            let limit = allowance(&self.schedule.benefit_limits, &locality);
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
        let tax_amount = taxable_area * rate.rate;

        debug!(
            land_use = ?input.land_use,
            region = %input.region,
            rate = %rate.rate,
            taxable_area = %taxable_area,
            tax = %tax_amount,
            "computed land tax"
        );

        Ok(CalculationResult {
            tax_amount,
            taxable_base: taxable_area,
            applied_rate: rate.rate,
            benefit,
            details: CalculationDetails::Land(LandDetails {
                land_use: input.land_use,
                region: input.region,
                locality,
                total_area: input.area,
                region_rate: rate.region_rate,
                purpose_multiplier: rate.multiplier,
                tax_without_benefit,
            }),
        })
    }
}
