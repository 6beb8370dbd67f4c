//! Tax year 2026 rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    AgeDiscount, AgriculturalPurpose as Agri, BenefitPolicy, BracketSchedule, CityTier,
    ForestPurpose, IndustrialPurpose as Ind, LandCategory, LandSchedule, LandUse, Locality,
    PropertySchedule, PropertyType, PurposeDefinition, RateTable, Region as R, ReservePurpose,
    SettlementPurpose as Set, TaxBracket, TaxYearSchedule, TransportSchedule, VehicleClass,
    WaterPurpose,
};

/// Monthly calculation index (MRP) for 2026, in tenge.
pub const MRP_2026: Decimal = dec!(4246);

pub fn kz_2026() -> TaxYearSchedule {
    TaxYearSchedule {
        tax_year: 2026,
        land: land(),
        property: property(),
        transport: transport(),
    }
}

/// Region order shared by the three per-region tables below.
const REGIONS: [R; 17] = [
    R::Astana,
    R::Almaty,
    R::Shymkent,
    R::Akmola,
    R::Aktobe,
    R::AlmatyRegion,
    R::Atyrau,
    R::Vko,
    R::Zhambyl,
    R::Zko,
    R::Karaganda,
    R::Kostanay,
    R::Kyzylorda,
    R::Mangystau,
    R::Pavlodar,
    R::Sko,
    R::Turkestan,
];

fn per_region(
    rates: [Decimal; 17],
    default: Decimal,
) -> RateTable<R> {
    RateTable::from_entries(REGIONS.into_iter().zip(rates), Some(default))
}

fn land() -> LandSchedule {
    let mut base_rates = BTreeMap::new();
    base_rates.insert(
        LandCategory::Agricultural,
        per_region(
            [
                dec!(58), dec!(70), dec!(52), dec!(46), dec!(46), dec!(52), dec!(58), dec!(46),
                dec!(46), dec!(40), dec!(46), dec!(46), dec!(40), dec!(52), dec!(46), dec!(40),
                dec!(46),
            ],
            dec!(35),
        ),
    );
    base_rates.insert(
        LandCategory::Settlement,
        per_region(
            [
                dec!(700), dec!(700), dec!(480), dec!(290), dec!(290), dec!(350), dec!(350),
                dec!(290), dec!(290), dec!(260), dec!(320), dec!(290), dec!(260), dec!(350),
                dec!(290), dec!(260), dec!(290),
            ],
            dec!(180),
        ),
    );
    base_rates.insert(
        LandCategory::Industrial,
        per_region(
            [
                dec!(480), dec!(480), dec!(360), dec!(240), dec!(240), dec!(300), dec!(300),
                dec!(240), dec!(240), dec!(200), dec!(260), dec!(240), dec!(200), dec!(280),
                dec!(240), dec!(200), dec!(240),
            ],
            dec!(180),
        ),
    );
    base_rates.insert(LandCategory::Forest, RateTable::new(Some(dec!(24))));
    base_rates.insert(LandCategory::Water, RateTable::new(Some(dec!(18))));
    base_rates.insert(LandCategory::Reserve, RateTable::new(Some(dec!(12))));

    let purposes = [
        (LandUse::Agricultural(Agri::Arable), dec!(1.0)),
        (LandUse::Agricultural(Agri::Hayfield), dec!(0.55)),
        (LandUse::Agricultural(Agri::Pasture), dec!(0.35)),
        (LandUse::Agricultural(Agri::Fallow), dec!(0.25)),
        (LandUse::Agricultural(Agri::Perennial), dec!(1.2)),
        (LandUse::Settlement(Set::Residential), dec!(1.0)),
        (LandUse::Settlement(Set::Commercial), dec!(1.6)),
        (LandUse::Settlement(Set::Garden), dec!(0.45)),
        (LandUse::Settlement(Set::Personal), dec!(0.35)),
        (LandUse::Settlement(Set::Recreation), dec!(0.8)),
        (LandUse::Industrial(Ind::Industry), dec!(1.0)),
        (LandUse::Industrial(Ind::Transport), dec!(0.75)),
        (LandUse::Industrial(Ind::Communication), dec!(0.55)),
        (LandUse::Industrial(Ind::Energy), dec!(0.85)),
        (LandUse::Industrial(Ind::Defense), dec!(0.5)),
        (LandUse::Forest(ForestPurpose::Forest), dec!(1.0)),
        (LandUse::Forest(ForestPurpose::Protection), dec!(0.5)),
        (LandUse::Water(WaterPurpose::Water), dec!(1.0)),
        (LandUse::Water(WaterPurpose::Fishing), dec!(0.8)),
        (LandUse::Reserve(ReservePurpose::Reserve), dec!(1.0)),
    ]
    .into_iter()
    .map(|(land_use, multiplier)| PurposeDefinition::new(land_use, multiplier))
    .collect();

    LandSchedule {
        base_rates,
        purposes,
        benefit_limits: BenefitPolicy::new(
            RateTable::new(None)
                .with(Locality::Urban, dec!(0.25))
                .with(Locality::Rural, dec!(1.0)),
        ),
    }
}

fn property() -> PropertySchedule {
    PropertySchedule {
        value_brackets: BracketSchedule::new_unchecked(vec![
            TaxBracket::bounded(dec!(52000000), dec!(0), dec!(0)),
            TaxBracket::bounded(dec!(104000000), dec!(0.0005), dec!(0)),
            TaxBracket::bounded(dec!(156000000), dec!(0.0007), dec!(26000)),
            TaxBracket::unbounded(dec!(0.001), dec!(62400)),
        ]),
        area_rates: RateTable::new(Some(dec!(55)))
            .with(CityTier::Astana, dec!(240))
            .with(CityTier::Almaty, dec!(240))
            .with(CityTier::Shymkent, dec!(180))
            .with(CityTier::Regional, dec!(140))
            .with(CityTier::District, dec!(90))
            .with(CityTier::Rural, dec!(55)),
        type_multipliers: RateTable::new(Some(dec!(1.0)))
            .with(PropertyType::Apartment, dec!(1.0))
            .with(PropertyType::House, dec!(1.3))
            .with(PropertyType::Dacha, dec!(0.75))
            .with(PropertyType::Garage, dec!(0.55)),
        benefit_areas: BenefitPolicy::new(
            RateTable::new(Some(dec!(150)))
                .with(CityTier::Astana, dec!(65))
                .with(CityTier::Almaty, dec!(65))
                .with(CityTier::Shymkent, dec!(70))
                .with(CityTier::Regional, dec!(80))
                .with(CityTier::District, dec!(100))
                .with(CityTier::Rural, dec!(150)),
        ),
    }
}

/// Bounded `(upper, rate)` brackets followed by an unbounded `top_rate`.
fn rate_brackets(
    bounded: &[(Decimal, Decimal)],
    top_rate: Decimal,
) -> BracketSchedule {
    let mut brackets: Vec<_> = bounded
        .iter()
        .map(|(upper, rate)| TaxBracket::bounded(*upper, *rate, Decimal::ZERO))
        .collect();
    brackets.push(TaxBracket::unbounded(top_rate, Decimal::ZERO));
    BracketSchedule::new_unchecked(brackets)
}

fn transport() -> TransportSchedule {
    let m = |v: i64| Decimal::from(v);
    let mut brackets = BTreeMap::new();
    brackets.insert(
        VehicleClass::Passenger,
        rate_brackets(
            &[(m(1500), m(5)), (m(2000), m(7)), (m(2500), m(10)), (m(3000), m(15)), (m(4000), m(20))],
            m(30),
        ),
    );
    brackets.insert(
        VehicleClass::Truck,
        rate_brackets(&[(m(2), m(7)), (m(5), m(10)), (m(10), m(15)), (m(20), m(20))], m(25)),
    );
    brackets.insert(
        VehicleClass::Motorcycle,
        rate_brackets(&[(m(250), m(2)), (m(500), m(4)), (m(750), m(6))], m(8)),
    );
    brackets.insert(
        VehicleClass::Bus,
        rate_brackets(&[(m(20), m(10)), (m(40), m(15))], m(20)),
    );
    brackets.insert(
        VehicleClass::Special,
        rate_brackets(&[(m(100), m(8)), (m(200), m(12))], m(18)),
    );
    brackets.insert(
        VehicleClass::Trailer,
        rate_brackets(&[(m(3), m(5)), (m(8), m(8))], m(12)),
    );

    TransportSchedule {
        brackets,
        index_constant: MRP_2026,
        age_discount: AgeDiscount {
            min_age_years: 10,
            coefficient: dec!(0.5),
        },
    }
}
