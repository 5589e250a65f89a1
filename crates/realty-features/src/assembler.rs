use rayon::prelude::*;
use realty_core::error::Result;
use realty_core::models::{
    ListingRecord, PoiCategory, PropertyType, TrainingRow, TrainingTable,
};

use crate::classify::classify_property_type;
use crate::impute::impute_medians;
use crate::inference::build_feature_row;
use crate::score::{education_score, score_raw};

/// Builds the training table from listing records
#[derive(Debug, Clone)]
pub struct DatasetAssembler {
    allowed: Vec<PropertyType>,
}

impl DatasetAssembler {
    /// Create an assembler keeping only the given property types
    pub fn new(allowed: Vec<PropertyType>) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &[PropertyType] {
        &self.allowed
    }

    /// Derive one training row before imputation.
    ///
    /// Returns `None` when the listing's property type is filtered out.
    pub fn derive_row(&self, listing: &ListingRecord) -> Option<TrainingRow> {
        let property_type = classify_property_type(listing.property_type_text.as_deref());
        if !self.allowed.contains(&property_type) {
            return None;
        }

        let scores = PoiCategory::ALL
            .map(|category| score_raw(category.config(), listing.proximity.get(category)));
        let education = match (
            scores[PoiCategory::PrivateSchool.index()],
            scores[PoiCategory::PublicSchool.index()],
        ) {
            (Some(private), Some(public)) => Some(education_score(private, public)),
            _ => None,
        };

        Some(TrainingRow {
            features: build_feature_row(&listing.structural, scores),
            property_type,
            education_score: education,
            proximity: listing.proximity,
            price: listing.price,
            log_price: listing.price.map(log_price),
        })
    }

    /// Score, classify, filter, bucket, and impute.
    ///
    /// Area buckets are derived from the raw area, before imputation.
    pub fn assemble(&self, listings: &[ListingRecord]) -> Result<TrainingTable> {
        let rows: Vec<TrainingRow> =
            listings.par_iter().filter_map(|listing| self.derive_row(listing)).collect();

        tracing::info!(
            input = listings.len(),
            kept = rows.len(),
            allowed = ?self.allowed.iter().map(|t| t.label()).collect::<Vec<_>>(),
            "Filtered listings by property type"
        );

        let mut table = TrainingTable { rows };
        impute_medians(&mut table)?;
        Ok(table)
    }
}

impl Default for DatasetAssembler {
    fn default() -> Self {
        Self::new(PropertyType::default_allowed())
    }
}

/// Regression target: `ln(max(price, 1))`
pub fn log_price(price: f64) -> f64 {
    price.max(1.0).ln()
}
