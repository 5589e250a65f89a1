//! Single-record feature rows for serving.
//!
//! [`build_feature_row`] is the one place a [`FeatureRow`] is put together;
//! the dataset assembler calls it too, so the training and serving rows
//! cannot drift apart.

use realty_core::error::Result;
use realty_core::models::{Coordinate, FeatureRow, StructuralAttributes};
use realty_geo::PoiContext;
use serde::{Deserialize, Serialize};

use crate::area::area_bucket;
use crate::score::score_vector;

/// Raw inference request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceInput {
    pub structural: StructuralAttributes,

    /// Precomputed scores ordered like `PoiCategory::ALL`; take precedence over `location`
    pub scores: Option<[Option<f64>; 7]>,

    /// Location to query the POI context with when no scores are given
    pub location: Option<Coordinate>,
}

impl InferenceInput {
    pub fn at(structural: StructuralAttributes, location: Coordinate) -> Self {
        Self { structural, scores: None, location: Some(location) }
    }
}

/// Build the model input row from structural attributes and category scores
pub fn build_feature_row(structural: &StructuralAttributes, scores: [Option<f64>; 7]) -> FeatureRow {
    FeatureRow {
        bedrooms: structural.bedrooms,
        bathrooms: structural.bathrooms,
        garage_spaces: structural.garage_spaces,
        area_m2: structural.area_m2,
        scores,
        neighborhood: structural.neighborhood.clone(),
        area_bucket: area_bucket(structural.area_m2),
    }
}

/// Turn a raw request into a feature row.
///
/// Absent inputs stay missing; no training statistic is substituted. With
/// neither scores nor a location every score is missing.
pub fn adapt(input: &InferenceInput, context: &PoiContext) -> Result<FeatureRow> {
    let scores = match (&input.scores, &input.location) {
        (Some(scores), _) => *scores,
        (None, Some(location)) => score_vector(&context.proximity(location)?).by_category.map(Some),
        (None, None) => [None; 7],
    };

    Ok(build_feature_row(&input.structural, scores))
}
