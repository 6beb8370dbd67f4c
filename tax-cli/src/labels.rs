//! English display text for the codes and breakdown fields.
//!
//! Keys follow the `display_key()` of the core code enums (`region.astana`,
//! `purpose.arable`, ...) plus a handful of field and unit keys used by the
//! renderer. Unknown keys come back unchanged so a missing entry shows up as
//! its key instead of an empty cell.

pub fn label(key: &str) -> String {
    lookup(key).map_or_else(|| key.to_string(), str::to_string)
}

fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        // Regions
        "region.astana" => "Astana",
        "region.almaty" => "Almaty",
        "region.shymkent" => "Shymkent",
        "region.akmola" => "Akmola Region",
        "region.aktobe" => "Aktobe Region",
        "region.almaty-region" => "Almaty Region",
        "region.atyrau" => "Atyrau Region",
        "region.vko" => "East Kazakhstan Region",
        "region.zhambyl" => "Zhambyl Region",
        "region.zko" => "West Kazakhstan Region",
        "region.karaganda" => "Karaganda Region",
        "region.kostanay" => "Kostanay Region",
        "region.kyzylorda" => "Kyzylorda Region",
        "region.mangystau" => "Mangystau Region",
        "region.pavlodar" => "Pavlodar Region",
        "region.sko" => "North Kazakhstan Region",
        "region.turkestan" => "Turkestan Region",

        "locality.urban" => "urban",
        "locality.rural" => "rural",

        // Land
        "category.agricultural" => "Agricultural land",
        "category.settlement" => "Settlement land",
        "category.industrial" => "Industrial, transport and other land",
        "category.forest" => "Forest fund land",
        "category.water" => "Water fund land",
        "category.reserve" => "Reserve land",

        "purpose.arable" => "Arable land",
        "purpose.hayfield" => "Hayfields",
        "purpose.pasture" => "Pastures",
        "purpose.fallow" => "Fallow land",
        "purpose.perennial" => "Perennial plantings",
        "purpose.residential" => "Residential development",
        "purpose.commercial" => "Commercial use",
        "purpose.garden" => "Gardening",
        "purpose.personal" => "Personal subsidiary farming",
        "purpose.recreation" => "Recreation",
        "purpose.industry" => "Industry",
        "purpose.transport" => "Transport",
        "purpose.communication" => "Communications",
        "purpose.energy" => "Energy",
        "purpose.defense" => "Defense",
        "purpose.forest" => "Forest",
        "purpose.protection" => "Protective plantings",
        "purpose.water" => "Water bodies",
        "purpose.fishing" => "Fisheries",
        "purpose.reserve" => "Reserve",

        // Property
        "property_type.apartment" => "Apartment",
        "property_type.house" => "Private house",
        "property_type.dacha" => "Dacha",
        "property_type.garage" => "Garage",

        "city_tier.astana" => "Astana",
        "city_tier.almaty" => "Almaty",
        "city_tier.shymkent" => "Shymkent",
        "city_tier.regional" => "Regional centre",
        "city_tier.district" => "District centre",
        "city_tier.rural" => "Rural settlement",

        // Transport
        "vehicle.passenger" => "Passenger car",
        "vehicle.truck" => "Truck",
        "vehicle.motorcycle" => "Motorcycle",
        "vehicle.bus" => "Bus",
        "vehicle.special" => "Special machinery",
        "vehicle.trailer" => "Trailer",

        "metric.engine-volume" => "Engine volume",
        "metric.load-capacity" => "Load capacity",
        "metric.seats" => "Seats",
        "metric.power" => "Power",

        "unit.cc" => "cc",
        "unit.tons" => "t",
        "unit.seats" => "seats",
        "unit.hp" => "hp",
        "unit.ha" => "ha",
        "unit.sotok" => "sotok",
        "unit.sqm" => "m²",
        "unit.years" => "years",
        "unit.mrp" => "MRP",

        // Breakdown fields
        "field.category" => "Category",
        "field.purpose" => "Purpose",
        "field.area" => "Area",
        "field.region" => "Region",
        "field.base_rate" => "Base rate",
        "field.multiplier" => "Multiplier",
        "field.effective_rate" => "Rate",
        "field.benefit_area" => "Benefit area",
        "field.taxable_area" => "Taxable area",
        "field.tax_without_benefit" => "Tax without benefit",
        "field.saving" => "Saving",
        "field.value" => "Assessed value",
        "field.bracket" => "Bracket",
        "field.marginal_rate" => "Marginal rate",
        "field.excess" => "Value above bracket start",
        "field.base_tax" => "Base tax",
        "field.tax_before_benefit" => "Tax before benefit",
        "field.property_type" => "Property type",
        "field.city_tier" => "Settlement",
        "field.vehicle" => "Vehicle",
        "field.year" => "Year of manufacture",
        "field.age" => "Age",
        "field.rate_mrp" => "Rate",
        "field.mrp" => "MRP",
        "field.age_coefficient" => "Age coefficient",
        "field.plate" => "Plate",
        "field.tax" => "Tax",
        "field.total" => "Total",

        // Notes
        "note.exempt" => "Exempt: value does not exceed",
        "note.full_exemption" => "Benefit applied: tax waived in full",
        "note.area_covered" => "Benefit area covers the whole plot, no tax due",
        "note.age_discount" => "Age discount applied",
        "note.no_benefit" => "Transport tax has no owner benefit",

        "title.land" => "Land tax",
        "title.property_value" => "Property tax (by value)",
        "title.property_area" => "Property tax (by area)",
        "title.transport" => "Transport tax",
        "title.purposes" => "Purposes",
        "title.fleet" => "Fleet transport tax",

        _ => return None,
    };
    Some(text)
}
