use rust_decimal::Decimal;
use thiserror::Error;

use super::codes::{LandCategory, VehicleClass};
use super::land::{LandSchedule, LandUse};
use super::property::PropertySchedule;
use super::transport::TransportSchedule;

/// Errors found while validating a [`TaxYearSchedule`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScheduleError {
    #[error("no land base rate table for category '{0}'")]
    MissingLandRates(LandCategory),

    #[error("no transport brackets for vehicle class '{0}'")]
    MissingTransportBrackets(VehicleClass),

    #[error("table '{table}' contains a negative value {value}")]
    NegativeRate { table: String, value: Decimal },

    #[error("multiplier for '{subject}' must be positive, got {value}")]
    NonPositiveMultiplier { subject: String, value: Decimal },

    #[error("purpose '{0:?}' is listed more than once")]
    DuplicatePurpose(LandUse),

    #[error("index constant must be positive, got {0}")]
    NonPositiveIndexConstant(Decimal),

    #[error("age discount coefficient must be in (0, 1], got {0}")]
    InvalidAgeCoefficient(Decimal),

    #[error("age discount threshold must be non-negative, got {0}")]
    InvalidAgeThreshold(i32),
}

/// Every constant the three calculators need for one tax year.
///
/// Calculators borrow the relevant part; swapping years means building a
/// different schedule, never touching calculator code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxYearSchedule {
    pub tax_year: i32,
    pub land: LandSchedule,
    pub property: PropertySchedule,
    pub transport: TransportSchedule,
}

impl TaxYearSchedule {
    /// Checks the invariants the calculators rely on.
    ///
    /// Bracket ordering is enforced when a [`super::BracketSchedule`] is
    /// built, so it is not rechecked here.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] encountered.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.validate_land()?;
        self.validate_property()?;
        self.validate_transport()
    }

    fn validate_land(&self) -> Result<(), ScheduleError> {
        for category in LandCategory::ALL {
            let table = self
                .land
                .base_rates
                .get(category)
                .ok_or(ScheduleError::MissingLandRates(*category))?;
            non_negative(&format!("land.base.{category}"), table.all_rates())?;
        }

        let mut seen = Vec::with_capacity(self.land.purposes.len());
        for purpose in &self.land.purposes {
            if seen.contains(&purpose.land_use) {
                return Err(ScheduleError::DuplicatePurpose(purpose.land_use));
            }
            seen.push(purpose.land_use);
            positive_multiplier(
                &format!("{}/{}", purpose.category(), purpose.purpose_code()),
                purpose.multiplier,
            )?;
        }

        non_negative(
            "land.benefit",
            self.land.benefit_limits.allowances().all_rates(),
        )
    }

    fn validate_property(&self) -> Result<(), ScheduleError> {
        let property = &self.property;
        non_negative("property.area_rate", property.area_rates.all_rates())?;
        non_negative(
            "property.benefit_area",
            property.benefit_areas.allowances().all_rates(),
        )?;

        for (property_type, multiplier) in property.type_multipliers.entries() {
            positive_multiplier(property_type.as_str(), multiplier)?;
        }
        if let Some(default) = property.type_multipliers.default_rate() {
            positive_multiplier("default property type", default)?;
        }

        Ok(())
    }

    fn validate_transport(&self) -> Result<(), ScheduleError> {
        let transport = &self.transport;
        for class in VehicleClass::ALL {
            if !transport.brackets.contains_key(class) {
                return Err(ScheduleError::MissingTransportBrackets(*class));
            }
        }

        if transport.index_constant <= Decimal::ZERO {
            return Err(ScheduleError::NonPositiveIndexConstant(
                transport.index_constant,
            ));
        }

        let discount = transport.age_discount;
        if discount.coefficient <= Decimal::ZERO || discount.coefficient > Decimal::ONE {
            return Err(ScheduleError::InvalidAgeCoefficient(discount.coefficient));
        }
        if discount.min_age_years < 0 {
            return Err(ScheduleError::InvalidAgeThreshold(discount.min_age_years));
        }

        Ok(())
    }
}

fn non_negative(
    table: &str,
    mut rates: impl Iterator<Item = Decimal>,
) -> Result<(), ScheduleError> {
    match rates.find(|rate| *rate < Decimal::ZERO) {
        Some(value) => Err(ScheduleError::NegativeRate {
            table: table.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

fn positive_multiplier(
    subject: &str,
    value: Decimal,
) -> Result<(), ScheduleError> {
    if value <= Decimal::ZERO {
        return Err(ScheduleError::NonPositiveMultiplier {
            subject: subject.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ForestPurpose, PropertyType, PurposeDefinition, Region};
    use crate::schedules;

    #[test]
    fn builtin_schedule_is_valid() {
        assert_eq!(schedules::kz_2026().validate(), Ok(()));
    }

    #[test]
    fn missing_land_category_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule.land.base_rates.remove(&LandCategory::Water);

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::MissingLandRates(LandCategory::Water))
        );
    }

    #[test]
    fn negative_base_rate_is_rejected() {
        let mut schedule = schedules::kz_2026();
        if let Some(table) = schedule.land.base_rates.get_mut(&LandCategory::Settlement) {
            table.insert(Region::Pavlodar, dec!(-1));
        }

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::NegativeRate {
                table: "land.base.settlement".to_string(),
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn zero_purpose_multiplier_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule.land.replace_purposes(
            LandCategory::Forest,
            vec![PurposeDefinition::new(
                LandUse::Forest(ForestPurpose::Forest),
                dec!(0),
            )],
        );

        assert!(matches!(
            schedule.validate(),
            Err(ScheduleError::NonPositiveMultiplier { .. })
        ));
    }

    #[test]
    fn duplicate_purpose_is_rejected() {
        let mut schedule = schedules::kz_2026();
        let first = schedule.land.purposes[0];
        schedule.land.purposes.push(first);

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::DuplicatePurpose(first.land_use))
        );
    }

    #[test]
    fn zero_property_multiplier_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule
            .property
            .type_multipliers
            .insert(PropertyType::Garage, dec!(0));

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::NonPositiveMultiplier {
                subject: "garage".to_string(),
                value: dec!(0),
            })
        );
    }

    #[test]
    fn missing_vehicle_class_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule.transport.brackets.remove(&VehicleClass::Bus);

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::MissingTransportBrackets(VehicleClass::Bus))
        );
    }

    #[test]
    fn zero_index_constant_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule.transport.index_constant = Decimal::ZERO;

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::NonPositiveIndexConstant(Decimal::ZERO))
        );
    }

    #[test]
    fn age_coefficient_above_one_is_rejected() {
        let mut schedule = schedules::kz_2026();
        schedule.transport.age_discount.coefficient = dec!(1.5);

        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::InvalidAgeCoefficient(dec!(1.5)))
        );
    }
}
