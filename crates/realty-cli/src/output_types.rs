use realty_core::models::{Coordinate, FeatureValue, PoiCategory};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

/// Output for prepare command
#[derive(Debug, Serialize)]
pub struct PrepareOutput {
    pub listings: usize,
    pub enriched: usize,
    pub rows: usize,
    pub allowed_types: Vec<String>,
    pub out: String,
}

/// Output for features command
#[derive(Debug, Serialize)]
pub struct FeaturesOutput {
    pub location: Coordinate,
    pub proximity: Vec<ProximityRow>,
    pub education_score: f64,
    pub features: BTreeMap<String, FeatureValue>,
}

/// Per-category proximity line
#[derive(Debug, Serialize, Tabled)]
pub struct ProximityRow {
    #[tabled(rename = "Category")]
    pub category: PoiCategory,

    #[tabled(rename = "Nearest (m)", display_with = "display_distance")]
    pub nearest_distance_m: Option<f64>,

    #[tabled(rename = "Count")]
    pub count_within_radius: u32,

    #[tabled(rename = "Radius (m)")]
    pub radius_m: f64,

    #[tabled(rename = "Score", display_with = "display_score")]
    pub score: f64,
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub poi_dir: String,
    pub categories: Vec<CategoryRow>,
    pub config: BTreeMap<String, ConfigEntry>,
}

/// Per-category context and scoring constants
#[derive(Debug, Serialize, Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "Category")]
    pub category: PoiCategory,

    #[tabled(rename = "Indexed")]
    pub indexed: usize,

    #[tabled(rename = "Dropped")]
    pub dropped: usize,

    #[tabled(rename = "Radius (m)")]
    pub radius_m: f64,

    #[tabled(rename = "Decay (m)")]
    pub decay_m: f64,

    #[tabled(rename = "w_exp")]
    pub weight_exp: f64,

    #[tabled(rename = "w_count")]
    pub weight_count: f64,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}

fn display_distance(distance: &Option<f64>) -> String {
    distance.map_or_else(|| "-".to_string(), |d| format!("{:.1}", d))
}

fn display_score(score: &f64) -> String {
    format!("{:.4}", score)
}
