use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::{
    AgriculturalPurpose, ForestPurpose, IndustrialPurpose, LandCategory, Locality, Region,
    ReservePurpose, SettlementPurpose, WaterPurpose,
};
use super::rate_table::{BenefitPolicy, RateTable};
use crate::calculations::InvalidInput;

/// A land category together with a purpose that belongs to it.
///
/// The purpose is carried inside its category's variant, so a purpose from
/// another category cannot be expressed. String input goes through
/// [`LandUse::from_codes`], which rejects mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandUse {
    Agricultural(AgriculturalPurpose),
    Settlement(SettlementPurpose),
    Industrial(IndustrialPurpose),
    Forest(ForestPurpose),
    Water(WaterPurpose),
    Reserve(ReservePurpose),
}

impl LandUse {
    /// Builds a land use from a category and the wire code of a purpose.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::PurposeNotInCategory`] if `purpose` is not one
    /// of the purposes defined for `category`.
    pub fn from_codes(
        category: LandCategory,
        purpose: &str,
    ) -> Result<Self, InvalidInput> {
        let purpose = purpose.trim();
        let land_use = match category {
            LandCategory::Agricultural => AgriculturalPurpose::parse(purpose).map(Self::Agricultural),
            LandCategory::Settlement => SettlementPurpose::parse(purpose).map(Self::Settlement),
            LandCategory::Industrial => IndustrialPurpose::parse(purpose).map(Self::Industrial),
            LandCategory::Forest => ForestPurpose::parse(purpose).map(Self::Forest),
            LandCategory::Water => WaterPurpose::parse(purpose).map(Self::Water),
            LandCategory::Reserve => ReservePurpose::parse(purpose).map(Self::Reserve),
        };

        land_use.ok_or_else(|| InvalidInput::PurposeNotInCategory {
            category,
            purpose: purpose.to_string(),
        })
    }

    /// Every valid land use of `category`, in declaration order.
    pub fn all_for(category: LandCategory) -> Vec<LandUse> {
        match category {
            LandCategory::Agricultural => AgriculturalPurpose::ALL
                .iter()
                .map(|p| Self::Agricultural(*p))
                .collect(),
            LandCategory::Settlement => SettlementPurpose::ALL
                .iter()
                .map(|p| Self::Settlement(*p))
                .collect(),
            LandCategory::Industrial => IndustrialPurpose::ALL
                .iter()
                .map(|p| Self::Industrial(*p))
                .collect(),
            LandCategory::Forest => ForestPurpose::ALL.iter().map(|p| Self::Forest(*p)).collect(),
            LandCategory::Water => WaterPurpose::ALL.iter().map(|p| Self::Water(*p)).collect(),
            LandCategory::Reserve => ReservePurpose::ALL.iter().map(|p| Self::Reserve(*p)).collect(),
        }
    }

    pub fn category(&self) -> LandCategory {
        match self {
            Self::Agricultural(_) => LandCategory::Agricultural,
            Self::Settlement(_) => LandCategory::Settlement,
            Self::Industrial(_) => LandCategory::Industrial,
            Self::Forest(_) => LandCategory::Forest,
            Self::Water(_) => LandCategory::Water,
            Self::Reserve(_) => LandCategory::Reserve,
        }
    }

    pub fn purpose_code(&self) -> &'static str {
        match self {
            Self::Agricultural(p) => p.as_str(),
            Self::Settlement(p) => p.as_str(),
            Self::Industrial(p) => p.as_str(),
            Self::Forest(p) => p.as_str(),
            Self::Water(p) => p.as_str(),
            Self::Reserve(p) => p.as_str(),
        }
    }

    pub fn display_key(&self) -> String {
        format!("purpose.{}", self.purpose_code())
    }
}

/// The multiplier a purpose applies to the category's regional base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeDefinition {
    pub land_use: LandUse,
    pub multiplier: Decimal,
}

impl PurposeDefinition {
    pub fn new(
        land_use: LandUse,
        multiplier: Decimal,
    ) -> Self {
        Self {
            land_use,
            multiplier,
        }
    }

    pub fn category(&self) -> LandCategory {
        self.land_use.category()
    }

    pub fn purpose_code(&self) -> &'static str {
        self.land_use.purpose_code()
    }

    pub fn display_key(&self) -> String {
        self.land_use.display_key()
    }
}

/// Land tax constants for one tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandSchedule {
    /// Per-hectare base rate by region, one table per category.
    pub base_rates: BTreeMap<LandCategory, RateTable<Region>>,
    /// Purpose multipliers, in display order.
    pub purposes: Vec<PurposeDefinition>,
    /// Hectares exempt for eligible owners, by locality.
    pub benefit_limits: BenefitPolicy<Locality>,
}

impl LandSchedule {
    /// Multiplier for `land_use`; 1 when the schedule does not list it.
    pub fn multiplier(
        &self,
        land_use: LandUse,
    ) -> Decimal {
        self.purposes
            .iter()
            .find(|p| p.land_use == land_use)
            .map_or(Decimal::ONE, |p| p.multiplier)
    }

    pub fn purposes_for(
        &self,
        category: LandCategory,
    ) -> impl Iterator<Item = &PurposeDefinition> {
        self.purposes
            .iter()
            .filter(move |p| p.category() == category)
    }

    /// Replaces every purpose of `category` with `definitions`, keeping the
    /// category's position in the list.
    pub fn replace_purposes(
        &mut self,
        category: LandCategory,
        definitions: Vec<PurposeDefinition>,
    ) {
        let at = self
            .purposes
            .iter()
            .position(|p| p.category() == category)
            .unwrap_or(self.purposes.len());
        self.purposes.retain(|p| p.category() != category);
        let tail = self.purposes.split_off(at);
        self.purposes.extend(definitions);
        self.purposes.extend(tail);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn from_codes_accepts_purpose_of_category() {
        let land_use = LandUse::from_codes(LandCategory::Settlement, "commercial").unwrap();

        assert_eq!(land_use, LandUse::Settlement(SettlementPurpose::Commercial));
        assert_eq!(land_use.category(), LandCategory::Settlement);
        assert_eq!(land_use.purpose_code(), "commercial");
    }

    #[test]
    fn from_codes_rejects_purpose_of_other_category() {
        let err = LandUse::from_codes(LandCategory::Forest, "arable").unwrap_err();

        assert_eq!(
            err,
            InvalidInput::PurposeNotInCategory {
                category: LandCategory::Forest,
                purpose: "arable".to_string(),
            }
        );
    }

    #[test]
    fn from_codes_rejects_empty_purpose() {
        assert!(matches!(
            LandUse::from_codes(LandCategory::Reserve, "  "),
            Err(InvalidInput::PurposeNotInCategory { .. })
        ));
    }

    #[test]
    fn shared_purpose_codes_stay_in_their_category() {
        // "transport" is an industrial purpose, not a category of its own.
        let land_use = LandUse::from_codes(LandCategory::Industrial, "transport").unwrap();

        assert_eq!(land_use, LandUse::Industrial(IndustrialPurpose::Transport));
        assert!(LandUse::from_codes(LandCategory::Settlement, "transport").is_err());
    }

    #[test]
    fn all_for_lists_purposes_in_order() {
        let uses = LandUse::all_for(LandCategory::Water);

        assert_eq!(
            uses,
            vec![
                LandUse::Water(WaterPurpose::Water),
                LandUse::Water(WaterPurpose::Fishing),
            ]
        );
    }

    #[test]
    fn display_key_uses_purpose_code() {
        assert_eq!(
            LandUse::Agricultural(AgriculturalPurpose::Hayfield).display_key(),
            "purpose.hayfield"
        );
    }

    #[test]
    fn multiplier_defaults_to_one_when_unlisted() {
        let schedule = LandSchedule {
            base_rates: BTreeMap::new(),
            purposes: vec![PurposeDefinition::new(
                LandUse::Forest(ForestPurpose::Protection),
                dec!(0.5),
            )],
            benefit_limits: BenefitPolicy::new(RateTable::new(None)),
        };

        assert_eq!(
            schedule.multiplier(LandUse::Forest(ForestPurpose::Protection)),
            dec!(0.5)
        );
        assert_eq!(schedule.multiplier(LandUse::Forest(ForestPurpose::Forest)), Decimal::ONE);
    }

    #[test]
    fn replace_purposes_only_touches_one_category() {
        let mut schedule = LandSchedule {
            base_rates: BTreeMap::new(),
            purposes: vec![
                PurposeDefinition::new(LandUse::Water(WaterPurpose::Fishing), dec!(0.8)),
                PurposeDefinition::new(LandUse::Reserve(ReservePurpose::Reserve), dec!(1)),
            ],
            benefit_limits: BenefitPolicy::new(RateTable::new(None)),
        };

        schedule.replace_purposes(
            LandCategory::Water,
            vec![PurposeDefinition::new(
                LandUse::Water(WaterPurpose::Fishing),
                dec!(0.7),
            )],
        );

        assert_eq!(schedule.purposes.len(), 2);
        assert_eq!(schedule.multiplier(LandUse::Water(WaterPurpose::Fishing)), dec!(0.7));
        assert_eq!(schedule.purposes_for(LandCategory::Reserve).count(), 1);
        assert_eq!(schedule.purposes[0].category(), LandCategory::Water);
    }
}
