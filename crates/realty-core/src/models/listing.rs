//! Listing records and their categorical derivations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::poi::{Coordinate, PoiCategory};
use crate::error::RealtyError;

/// Property-type category derived from listing free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    House,
    Apartment,
    Commercial,
    Building,
    Land,
    Other,
}

impl PropertyType {
    /// Label used in source tables and configuration
    pub fn label(self) -> &'static str {
        match self {
            PropertyType::House => "casa",
            PropertyType::Apartment => "apartamento",
            PropertyType::Commercial => "comercial",
            PropertyType::Building => "predio",
            PropertyType::Land => "terreno",
            PropertyType::Other => "outros",
        }
    }

    /// Default training allow-list
    pub fn default_allowed() -> Vec<PropertyType> {
        vec![PropertyType::House, PropertyType::Apartment, PropertyType::Commercial]
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casa" | "house" => Ok(PropertyType::House),
            "apartamento" | "apartment" => Ok(PropertyType::Apartment),
            "comercial" | "commercial" => Ok(PropertyType::Commercial),
            "predio" | "building" => Ok(PropertyType::Building),
            "terreno" | "land" => Ok(PropertyType::Land),
            "outros" | "other" => Ok(PropertyType::Other),
            other => Err(RealtyError::ConfigInvalid {
                key: "property_type".to_string(),
                reason: format!("unknown property type '{}'", other),
            }),
        }
    }
}

/// Area bucket used as a categorical model feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaBucket {
    UpTo50,
    From50To80,
    From80To120,
    From120To200,
    From200To400,
    Over400,
}

impl AreaBucket {
    pub const ALL: [AreaBucket; 6] = [
        AreaBucket::UpTo50,
        AreaBucket::From50To80,
        AreaBucket::From80To120,
        AreaBucket::From120To200,
        AreaBucket::From200To400,
        AreaBucket::Over400,
    ];

    /// Label the trained model was fitted on
    pub fn label(self) -> &'static str {
        match self {
            AreaBucket::UpTo50 => "Até 50",
            AreaBucket::From50To80 => "50–80",
            AreaBucket::From80To120 => "80–120",
            AreaBucket::From120To200 => "120–200",
            AreaBucket::From200To400 => "200–400",
            AreaBucket::Over400 => "400+",
        }
    }

    /// Inclusive upper edge of the bucket, `None` for the open-ended one
    pub fn upper_edge(self) -> Option<f64> {
        match self {
            AreaBucket::UpTo50 => Some(50.0),
            AreaBucket::From50To80 => Some(80.0),
            AreaBucket::From80To120 => Some(120.0),
            AreaBucket::From120To200 => Some(200.0),
            AreaBucket::From200To400 => Some(400.0),
            AreaBucket::Over400 => None,
        }
    }
}

impl fmt::Display for AreaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural attributes shared by training listings and inference requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralAttributes {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub area_m2: Option<f64>,
    pub neighborhood: Option<String>,
}

/// Raw distance/count columns of one category as read from a listing table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProximityEntry {
    pub distance_m: Option<f64>,
    pub count: Option<f64>,
}

/// Raw `dist_*` / `qtd_*` columns for every category, ordered like [`PoiCategory::ALL`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProximity {
    pub entries: [RawProximityEntry; 7],
}

impl RawProximity {
    pub fn get(&self, category: PoiCategory) -> &RawProximityEntry {
        &self.entries[category.index()]
    }

    pub fn get_mut(&mut self, category: PoiCategory) -> &mut RawProximityEntry {
        &mut self.entries[category.index()]
    }
}

/// Listing as ingested for training
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub price: Option<f64>,
    pub property_type_text: Option<String>,
    pub structural: StructuralAttributes,
    pub location: Option<Coordinate>,
    pub proximity: RawProximity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_round_trips_label() {
        for ty in [
            PropertyType::House,
            PropertyType::Apartment,
            PropertyType::Commercial,
            PropertyType::Building,
            PropertyType::Land,
            PropertyType::Other,
        ] {
            assert_eq!(ty.label().parse::<PropertyType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_property_type_is_rejected() {
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_bucket_edges_increase() {
        let edges: Vec<f64> = AreaBucket::ALL.iter().filter_map(|b| b.upper_edge()).collect();
        assert_eq!(edges, vec![50.0, 80.0, 120.0, 200.0, 400.0]);
    }
}
