use super::codes::{CityTier, PropertyType};
use super::rate_table::{BenefitPolicy, RateTable};
use super::tax_bracket::BracketSchedule;

/// Property tax constants for one tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchedule {
    /// Progressive brackets on assessed value. A value in the first bracket
    /// that comes out at zero tax is reported as exempt.
    pub value_brackets: BracketSchedule,
    /// Per-square-metre rate by city tier.
    pub area_rates: RateTable<CityTier>,
    pub type_multipliers: RateTable<PropertyType>,
    /// Square metres exempt for eligible owners, by city tier.
    pub benefit_areas: BenefitPolicy<CityTier>,
}
