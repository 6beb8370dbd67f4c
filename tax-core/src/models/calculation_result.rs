use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::{CityTier, Locality, PropertyType, Region, VehicleClass};
use super::land::LandUse;

/// How an eligibility benefit changed the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenefitApplied {
    NotApplied,
    /// An allowance was subtracted from the taxable base. `deducted` is the
    /// allowance capped at the base.
    Deduction { allowance: Decimal, deducted: Decimal },
    /// The whole computed tax was waived.
    FullExemption { waived_tax: Decimal },
}

impl BenefitApplied {
    pub fn is_applied(&self) -> bool {
        !matches!(self, BenefitApplied::NotApplied)
    }
}

/// Output of every calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub tax_amount: Decimal,
    /// Area, value or size metric the rate was applied to, after benefits.
    pub taxable_base: Decimal,
    pub applied_rate: Decimal,
    pub benefit: BenefitApplied,
    pub details: CalculationDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationDetails {
    Land(LandDetails),
    PropertyByValue(PropertyValueDetails),
    PropertyByArea(PropertyAreaDetails),
    Transport(TransportDetails),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandDetails {
    pub land_use: LandUse,
    pub region: Region,
    pub locality: Locality,
    /// Hectares.
    pub total_area: Decimal,
    /// Base rate for the region before the purpose multiplier.
    pub region_rate: Decimal,
    pub purpose_multiplier: Decimal,
    pub tax_without_benefit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValueDetails {
    pub assessed_value: Decimal,
    pub bracket_index: usize,
    pub bracket_lower: Decimal,
    pub bracket_upper: Option<Decimal>,
    pub marginal_rate: Decimal,
    pub base_tax: Decimal,
    /// Portion of the value above `bracket_lower`.
    pub excess: Decimal,
    pub exemption_threshold: Option<Decimal>,
    pub exempt: bool,
    pub tax_before_benefit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAreaDetails {
    pub property_type: PropertyType,
    pub city_tier: CityTier,
    /// Square metres.
    pub total_area: Decimal,
    pub base_rate: Decimal,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDetails {
    pub vehicle_class: VehicleClass,
    pub metric: Decimal,
    pub bracket_index: usize,
    pub bracket_lower: Decimal,
    pub bracket_upper: Option<Decimal>,
    /// Bracket rate in units of the index constant.
    pub rate_in_index_units: Decimal,
    pub index_constant: Decimal,
    pub base_tax: Decimal,
    pub manufacture_year: i32,
    pub vehicle_age: i32,
    pub age_coefficient: Decimal,
    pub tax_year: i32,
}
