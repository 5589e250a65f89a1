//! Proximity features, scores, and the model feature row.

use serde::{Deserialize, Serialize};

use super::listing::AreaBucket;
use super::poi::PoiCategory;

/// Nearest distance and radius count for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityFeature {
    /// Haversine distance to the closest POI; `None` when the category has no POIs
    pub nearest_distance_m: Option<f64>,

    /// POIs at or within the category radius
    pub count_within_radius: u32,
}

impl ProximityFeature {
    /// Degraded value for a category without any indexed POI
    pub const EMPTY: ProximityFeature =
        ProximityFeature { nearest_distance_m: None, count_within_radius: 0 };
}

/// Proximity features for every category, ordered like [`PoiCategory::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityFeatureVector {
    pub entries: [ProximityFeature; 7],
}

impl ProximityFeatureVector {
    pub fn get(&self, category: PoiCategory) -> &ProximityFeature {
        &self.entries[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoiCategory, &ProximityFeature)> {
        PoiCategory::ALL.iter().copied().zip(self.entries.iter())
    }
}

/// One score per category plus the education composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityScores {
    pub by_category: [f64; 7],
    pub education: f64,
}

impl ProximityScores {
    pub fn get(&self, category: PoiCategory) -> f64 {
        self.by_category[category.index()]
    }
}

/// A single cell of a feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(Option<f64>),
    Category(Option<String>),
}

impl FeatureValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Number(None) | FeatureValue::Category(None))
    }
}

/// Model input row. `None` marks a missing value left for the model's own imputer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub area_m2: Option<f64>,

    /// Proximity scores ordered like [`PoiCategory::ALL`]
    pub scores: [Option<f64>; 7],

    pub neighborhood: Option<String>,
    pub area_bucket: Option<AreaBucket>,
}

impl FeatureRow {
    /// Numeric model inputs, in order
    pub const NUMERIC_COLUMNS: [&'static str; 11] = [
        "quartos",
        "banheiros",
        "vagas_garagem",
        "area_m2",
        "score_escola_privada",
        "score_escola_publica",
        "score_hospitais",
        "score_mercado",
        "score_farmacia",
        "score_parque",
        "score_seguranca",
    ];

    /// Categorical model inputs, in order
    pub const CATEGORICAL_COLUMNS: [&'static str; 2] = ["bairro", "faixa_area"];

    /// Every column in model order
    pub fn columns() -> Vec<&'static str> {
        Self::NUMERIC_COLUMNS.iter().chain(Self::CATEGORICAL_COLUMNS.iter()).copied().collect()
    }

    pub fn score(&self, category: PoiCategory) -> Option<f64> {
        self.scores[category.index()]
    }

    /// Cell values in the same order as [`FeatureRow::columns`]
    pub fn values(&self) -> Vec<FeatureValue> {
        let mut values = Vec::with_capacity(13);
        values.push(FeatureValue::Number(self.bedrooms));
        values.push(FeatureValue::Number(self.bathrooms));
        values.push(FeatureValue::Number(self.garage_spaces));
        values.push(FeatureValue::Number(self.area_m2));
        values.extend(self.scores.iter().map(|s| FeatureValue::Number(*s)));
        values.push(FeatureValue::Category(self.neighborhood.clone()));
        values.push(FeatureValue::Category(self.area_bucket.map(|b| b.label().to_string())));
        values
    }

    /// Column/value pairs in model order
    pub fn named_values(&self) -> Vec<(&'static str, FeatureValue)> {
        Self::columns().into_iter().zip(self.values()).collect()
    }
}
