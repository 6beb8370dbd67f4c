use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::VehicleClass;
use super::tax_bracket::BracketSchedule;

/// Flat discount for vehicles at or above a given age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDiscount {
    pub min_age_years: i32,
    pub coefficient: Decimal,
}

impl AgeDiscount {
    /// Coefficient applied to a vehicle of `age_years`; 1 below the threshold.
    pub fn coefficient_for(
        &self,
        age_years: i32,
    ) -> Decimal {
        if age_years >= self.min_age_years {
            self.coefficient
        } else {
            Decimal::ONE
        }
    }
}

/// Transport tax constants for one tax year.
///
/// Bracket rates are expressed in units of `index_constant` (the monthly
/// calculation index for the year); `base_tax` is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSchedule {
    pub brackets: BTreeMap<VehicleClass, BracketSchedule>,
    pub index_constant: Decimal,
    pub age_discount: AgeDiscount,
}
