mod calculation_result;
mod codes;
mod land;
mod property;
mod rate_table;
mod tax_bracket;
mod tax_year_schedule;
mod transport;

pub use calculation_result::{
    BenefitApplied, CalculationDetails, CalculationResult, LandDetails, PropertyAreaDetails,
    PropertyValueDetails, TransportDetails,
};
pub use codes::{
    AgriculturalPurpose, CityTier, ForestPurpose, IndustrialPurpose, LandCategory, Locality,
    PropertyType, Region, ReservePurpose, SettlementPurpose, VehicleClass, VehicleMetric,
    WaterPurpose,
};
pub use land::{LandSchedule, LandUse, PurposeDefinition};
pub use property::PropertySchedule;
pub use rate_table::{BenefitPolicy, RateTable};
pub use tax_bracket::{BracketError, BracketSchedule, TaxBracket};
pub use tax_year_schedule::{ScheduleError, TaxYearSchedule};
pub use transport::{AgeDiscount, TransportSchedule};
