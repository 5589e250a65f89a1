//! Point-of-interest categories and their fixed proximity configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS 84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the WGS 84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Latitude and longitude in radians
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// POI categories used as proximity references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    PrivateSchool,
    PublicSchool,
    Hospital,
    Market,
    Pharmacy,
    Park,
    Police,
}

/// Radius and score-formula constants for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    pub category: PoiCategory,

    /// Radius for the count feature, inclusive
    pub radius_m: f64,

    /// Decay length of the exponential distance term
    pub decay_m: f64,

    /// Weight of the exponential distance term
    pub weight_exp: f64,

    /// Weight of the count term
    pub weight_count: f64,

    /// Column holding the nearest distance in meters
    pub distance_column: &'static str,

    /// Column holding the count within radius
    pub count_column: &'static str,

    /// Column holding the proximity score
    pub score_column: &'static str,
}

/// Configuration table, ordered like [`PoiCategory::ALL`].
const CATEGORY_TABLE: [CategoryConfig; 7] = [
    CategoryConfig {
        category: PoiCategory::PrivateSchool,
        radius_m: 500.0,
        decay_m: 600.0,
        weight_exp: 1.2,
        weight_count: 0.6,
        distance_column: "dist_escolas_privadas_mais_proximo",
        count_column: "qtd_escolas_privadas_500m",
        score_column: "score_escola_privada",
    },
    CategoryConfig {
        category: PoiCategory::PublicSchool,
        radius_m: 500.0,
        decay_m: 600.0,
        weight_exp: 0.6,
        weight_count: 0.2,
        distance_column: "dist_escola_publicas_mais_proximo",
        count_column: "qtd_escola_publicas_500m",
        score_column: "score_escola_publica",
    },
    CategoryConfig {
        category: PoiCategory::Hospital,
        radius_m: 1000.0,
        decay_m: 1200.0,
        weight_exp: 0.8,
        weight_count: 0.4,
        distance_column: "dist_hospital_mais_proximo",
        count_column: "qtd_hospital_1000m",
        score_column: "score_hospitais",
    },
    CategoryConfig {
        category: PoiCategory::Market,
        radius_m: 500.0,
        decay_m: 400.0,
        weight_exp: 1.0,
        weight_count: 0.4,
        distance_column: "dist_mercado_mais_proximo",
        count_column: "qtd_mercado_500m",
        score_column: "score_mercado",
    },
    CategoryConfig {
        category: PoiCategory::Pharmacy,
        radius_m: 300.0,
        decay_m: 300.0,
        weight_exp: 0.6,
        weight_count: 0.2,
        distance_column: "dist_farmacia_mais_proximo",
        count_column: "qtd_farmacia_300m",
        score_column: "score_farmacia",
    },
    CategoryConfig {
        category: PoiCategory::Park,
        radius_m: 1000.0,
        decay_m: 1200.0,
        weight_exp: 1.2,
        weight_count: 0.8,
        distance_column: "dist_parque_mais_proximo",
        count_column: "qtd_parque_1000m",
        score_column: "score_parque",
    },
    CategoryConfig {
        category: PoiCategory::Police,
        radius_m: 500.0,
        decay_m: 1500.0,
        weight_exp: 1.0,
        weight_count: 0.3,
        distance_column: "dist_policia_mais_proximo",
        count_column: "qtd_policia_500m",
        score_column: "score_seguranca",
    },
];

impl PoiCategory {
    /// Every category, in table order
    pub const ALL: [PoiCategory; 7] = [
        PoiCategory::PrivateSchool,
        PoiCategory::PublicSchool,
        PoiCategory::Hospital,
        PoiCategory::Market,
        PoiCategory::Pharmacy,
        PoiCategory::Park,
        PoiCategory::Police,
    ];

    /// Position of this category in [`PoiCategory::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed configuration for this category
    pub fn config(self) -> &'static CategoryConfig {
        &CATEGORY_TABLE[self.index()]
    }

    /// The full configuration table
    pub fn table() -> &'static [CategoryConfig; 7] {
        &CATEGORY_TABLE
    }

    pub fn name(self) -> &'static str {
        match self {
            PoiCategory::PrivateSchool => "private_school",
            PoiCategory::PublicSchool => "public_school",
            PoiCategory::Hospital => "hospital",
            PoiCategory::Market => "market",
            PoiCategory::Pharmacy => "pharmacy",
            PoiCategory::Park => "park",
            PoiCategory::Police => "police",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One POI row after loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub category: PoiCategory,

    /// Raw geometry text as found in the source table
    pub geometry: Option<String>,

    /// Derived coordinate; `None` until extracted or when extraction failed
    pub coordinate: Option<Coordinate>,
}

impl PoiRecord {
    /// Record that still needs its coordinate extracted from geometry
    pub fn from_geometry(category: PoiCategory, geometry: impl Into<String>) -> Self {
        Self { category, geometry: Some(geometry.into()), coordinate: None }
    }

    /// Record with a known coordinate
    pub fn at(category: PoiCategory, coordinate: Coordinate) -> Self {
        Self { category, geometry: None, coordinate: Some(coordinate) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_like_all() {
        for (i, category) in PoiCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(category.config().category, *category);
        }
    }

    #[test]
    fn test_column_names_are_unique() {
        let mut columns: Vec<&str> = PoiCategory::table()
            .iter()
            .flat_map(|c| [c.distance_column, c.count_column, c.score_column])
            .collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), 21);
    }

    #[test]
    fn test_count_column_carries_radius() {
        for config in PoiCategory::table() {
            let suffix = format!("_{}m", config.radius_m as u32);
            assert!(config.count_column.ends_with(&suffix), "{}", config.count_column);
        }
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(-25.09, -50.16).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }
}
