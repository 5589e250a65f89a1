//! Realty Features - Scores, derivations, and feature-row assembly
//!
//! This crate turns proximity features into scores, derives the categorical
//! columns, assembles the training table, and reproduces the same per-row
//! logic for single inference requests.

pub mod area;
pub mod assembler;
pub mod classify;
pub mod enrich;
pub mod impute;
pub mod inference;
pub mod predict;
pub mod schema;
pub mod score;

pub use area::area_bucket;
pub use assembler::{log_price, DatasetAssembler};
pub use classify::classify_property_type;
pub use enrich::enrich_listings;
pub use impute::{impute_medians, median, NumericColumn};
pub use inference::{adapt, build_feature_row, InferenceInput};
pub use predict::Predictor;
pub use schema::{feature_columns, validate_schema};
pub use score::{
    education_score, proximity_score, score_feature, score_raw, score_vector, EDUCATION_PUBLIC_WEIGHT,
};
