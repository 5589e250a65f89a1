//! Proximity scores.
//!
//! One formula for every category and for both the training and the serving
//! path: `weight_exp * exp(-distance / decay) + weight_count * count`.

use realty_core::models::{
    CategoryConfig, PoiCategory, ProximityFeature, ProximityFeatureVector, ProximityScores,
    RawProximityEntry,
};

/// Weight of the public-school score subtracted in the education composite
pub const EDUCATION_PUBLIC_WEIGHT: f64 = 0.2;

/// Score one category.
///
/// An undefined distance contributes nothing to the exponential term, so an
/// empty category with a zero count scores exactly 0.
pub fn proximity_score(config: &CategoryConfig, distance_m: Option<f64>, count: f64) -> f64 {
    let decay = distance_m.map_or(0.0, |d| (-d / config.decay_m).exp());
    config.weight_exp * decay + config.weight_count * count
}

/// Score a queried proximity feature
pub fn score_feature(config: &CategoryConfig, feature: &ProximityFeature) -> f64 {
    proximity_score(config, feature.nearest_distance_m, f64::from(feature.count_within_radius))
}

/// Score raw table columns; a missing count leaves the score missing
pub fn score_raw(config: &CategoryConfig, entry: &RawProximityEntry) -> Option<f64> {
    entry.count.map(|count| proximity_score(config, entry.distance_m, count))
}

/// Private-school score minus a fraction of the public-school score
pub fn education_score(private: f64, public: f64) -> f64 {
    private - EDUCATION_PUBLIC_WEIGHT * public
}

/// Score every category of a feature vector
pub fn score_vector(vector: &ProximityFeatureVector) -> ProximityScores {
    let by_category =
        PoiCategory::ALL.map(|category| score_feature(category.config(), vector.get(category)));

    ProximityScores {
        education: education_score(
            by_category[PoiCategory::PrivateSchool.index()],
            by_category[PoiCategory::PublicSchool.index()],
        ),
        by_category,
    }
}
