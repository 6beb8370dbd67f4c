//! Closed code enumerations shared by the calculators.
//!
//! Every code has a stable lowercase wire form. The same string is used in
//! CSV schedule data, on the command line, and as the suffix of the display
//! key handed to the presentation layer (`region.astana`, `vehicle.bus`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::InvalidInput;

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, kind = $kind:tt, prefix = $prefix:tt {
            $($variant:ident => $code:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Human-oriented name of the enumeration, used in error messages.
            pub const KIND: &'static str = $kind;

            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn display_key(&self) -> String {
                format!("{}.{}", $prefix, self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidInput;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s.trim()).ok_or_else(|| InvalidInput::UnknownCode {
                    kind: $kind,
                    code: s.to_string(),
                })
            }
        }
    };
}

code_enum! {
    /// Administrative region used to look up land base rates.
    Region, kind = "region", prefix = "region" {
        Astana => "astana",
        Almaty => "almaty",
        Shymkent => "shymkent",
        Akmola => "akmola",
        Aktobe => "aktobe",
        AlmatyRegion => "almaty-region",
        Atyrau => "atyrau",
        Vko => "vko",
        Zhambyl => "zhambyl",
        Zko => "zko",
        Karaganda => "karaganda",
        Kostanay => "kostanay",
        Kyzylorda => "kyzylorda",
        Mangystau => "mangystau",
        Pavlodar => "pavlodar",
        Sko => "sko",
        Turkestan => "turkestan",
    }
}

impl Region {
    /// The three cities of republican significance count as urban; every
    /// other region is rural.
    pub fn locality(&self) -> Locality {
        match self {
            Region::Astana | Region::Almaty | Region::Shymkent => Locality::Urban,
            _ => Locality::Rural,
        }
    }
}

code_enum! {
    /// Urban/rural classification driving the land benefit allowance.
    Locality, kind = "locality", prefix = "locality" {
        Urban => "urban",
        Rural => "rural",
    }
}

code_enum! {
    LandCategory, kind = "land category", prefix = "category" {
        Agricultural => "agricultural",
        Settlement => "settlement",
        Industrial => "industrial",
        Forest => "forest",
        Water => "water",
        Reserve => "reserve",
    }
}

code_enum! {
    AgriculturalPurpose, kind = "agricultural purpose", prefix = "purpose" {
        Arable => "arable",
        Hayfield => "hayfield",
        Pasture => "pasture",
        Fallow => "fallow",
        Perennial => "perennial",
    }
}

code_enum! {
    SettlementPurpose, kind = "settlement purpose", prefix = "purpose" {
        Residential => "residential",
        Commercial => "commercial",
        Garden => "garden",
        Personal => "personal",
        Recreation => "recreation",
    }
}

code_enum! {
    IndustrialPurpose, kind = "industrial purpose", prefix = "purpose" {
        Industry => "industry",
        Transport => "transport",
        Communication => "communication",
        Energy => "energy",
        Defense => "defense",
    }
}

code_enum! {
    ForestPurpose, kind = "forest purpose", prefix = "purpose" {
        Forest => "forest",
        Protection => "protection",
    }
}

code_enum! {
    WaterPurpose, kind = "water purpose", prefix = "purpose" {
        Water => "water",
        Fishing => "fishing",
    }
}

code_enum! {
    ReservePurpose, kind = "reserve purpose", prefix = "purpose" {
        Reserve => "reserve",
    }
}

code_enum! {
    PropertyType, kind = "property type", prefix = "property_type" {
        Apartment => "apartment",
        House => "house",
        Dacha => "dacha",
        Garage => "garage",
    }
}

code_enum! {
    /// Settlement tier for area-based property tax.
    CityTier, kind = "city tier", prefix = "city_tier" {
        Astana => "astana",
        Almaty => "almaty",
        Shymkent => "shymkent",
        Regional => "regional",
        District => "district",
        Rural => "rural",
    }
}

code_enum! {
    VehicleClass, kind = "vehicle class", prefix = "vehicle" {
        Passenger => "passenger",
        Truck => "truck",
        Motorcycle => "motorcycle",
        Bus => "bus",
        Special => "special",
        Trailer => "trailer",
    }
}

code_enum! {
    /// The size measure a vehicle class is bracketed on.
    VehicleMetric, kind = "vehicle metric", prefix = "metric" {
        EngineVolume => "engine-volume",
        LoadCapacity => "load-capacity",
        Seats => "seats",
        Power => "power",
    }
}

impl VehicleClass {
    pub fn metric(&self) -> VehicleMetric {
        match self {
            VehicleClass::Passenger | VehicleClass::Motorcycle => VehicleMetric::EngineVolume,
            VehicleClass::Truck | VehicleClass::Trailer => VehicleMetric::LoadCapacity,
            VehicleClass::Bus => VehicleMetric::Seats,
            VehicleClass::Special => VehicleMetric::Power,
        }
    }
}

impl VehicleMetric {
    /// Display key of the unit the metric is measured in.
    pub fn unit_key(&self) -> &'static str {
        match self {
            VehicleMetric::EngineVolume => "unit.cc",
            VehicleMetric::LoadCapacity => "unit.tons",
            VehicleMetric::Seats => "unit.seats",
            VehicleMetric::Power => "unit.hp",
        }
    }
}
