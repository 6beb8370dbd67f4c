//! Transport tax.
//!
//! The vehicle class selects a bracket schedule over its size metric (engine
//! volume, load capacity, seats or power). The bracket rate is a number of
//! monthly calculation indexes (MRP), so:
//!
//! ```text
//! tax = rate × MRP × age coefficient
//! ```
//!
//! where the age coefficient is 0.5 for vehicles 10 or more years old and 1
//! otherwise. There is no owner benefit for this tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::VehicleClass;
//! use tax_core::calculations::{TransportTaxCalculator, TransportTaxInput};
//! use tax_core::schedules::kz_2026;
//!
//! let schedule = kz_2026();
//! let calculator = TransportTaxCalculator::new(&schedule.transport, schedule.tax_year);
//!
//! let result = calculator
//!     .compute(&TransportTaxInput {
//!         vehicle_class: VehicleClass::Passenger,
//!         metric: dec!(1800),
//!         manufacture_year: 2016,
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.tax_amount, dec!(14861));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{InvalidInput, require_positive};
use super::resolver::locate;
use crate::models::{
    BenefitApplied, CalculationDetails, CalculationResult, TaxYearSchedule, TransportDetails,
    TransportSchedule, VehicleClass,
};

/// Oldest manufacture year accepted as input.
pub const EARLIEST_MANUFACTURE_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportTaxInput {
    pub vehicle_class: VehicleClass,
    /// Measured in the unit of [`VehicleClass::metric`]; must be positive.
    pub metric: Decimal,
    pub manufacture_year: i32,
}

#[derive(Debug, Clone)]
pub struct TransportTaxCalculator<'a> {
    schedule: &'a TransportSchedule,
    tax_year: i32,
}

impl<'a> TransportTaxCalculator<'a> {
    pub fn new(
        schedule: &'a TransportSchedule,
        tax_year: i32,
    ) -> Self {
        Self { schedule, tax_year }
    }

    /// Borrows the transport part of a full year schedule.
    pub fn for_year(schedule: &'a TaxYearSchedule) -> Self {
        Self::new(&schedule.transport, schedule.tax_year)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Computes transport tax.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NotPositive`] for a zero or negative metric and
    /// [`InvalidInput::YearOutOfRange`] for a manufacture year before
    /// [`EARLIEST_MANUFACTURE_YEAR`] or after the tax year.
    pub fn compute(
        &self,
        input: &TransportTaxInput,
    ) -> Result<CalculationResult, InvalidInput> {
        require_positive("metric", input.metric)?;
        if !(EARLIEST_MANUFACTURE_YEAR..=self.tax_year).contains(&input.manufacture_year) {
            return Err(InvalidInput::YearOutOfRange {
                year: input.manufacture_year,
                earliest: EARLIEST_MANUFACTURE_YEAR,
                latest: self.tax_year,
            });
        }

        let vehicle_age = self.tax_year - input.manufacture_year;
        let age_coefficient = self.schedule.age_discount.coefficient_for(vehicle_age);
        let index_constant = self.schedule.index_constant;

        let (bracket_index, bracket_lower, bracket_upper, rate) =
            match self.schedule.brackets.get(&input.vehicle_class) {
                Some(brackets) => {
                    let found = locate(brackets, input.metric);
                    (found.index, found.lower, found.bracket.upper, found.bracket.rate)
                }
                None => {
                    trace!(class = %input.vehicle_class, "no brackets for class, rate is zero");
                    (0, Decimal::ZERO, None, Decimal::ZERO)
                }
            };

        let base_tax = rate * index_constant;
        let tax_amount = base_tax * age_coefficient;

        debug!(
            class = %input.vehicle_class,
            metric = %input.metric,
            rate = %rate,
            age = vehicle_age,
            tax = %tax_amount,
            "computed transport tax"
        );

        Ok(CalculationResult {
            tax_amount,
            taxable_base: input.metric,
            applied_rate: rate,
            benefit: BenefitApplied::NotApplied,
            details: CalculationDetails::Transport(TransportDetails {
                vehicle_class: input.vehicle_class,
                metric: input.metric,
                bracket_index,
                bracket_lower,
                bracket_upper,
                rate_in_index_units: rate,
                index_constant,
                base_tax,
                manufacture_year: input.manufacture_year,
                vehicle_age,
                age_coefficient,
                tax_year: self.tax_year,
            }),
        })
    }
}
