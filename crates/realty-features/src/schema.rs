//! Model feature schema.

use realty_core::error::{RealtyError, Result};
use realty_core::models::FeatureRow;

/// Ordered feature columns produced by both the assembler and the inference adapter
pub fn feature_columns() -> Vec<String> {
    FeatureRow::columns().into_iter().map(String::from).collect()
}

/// Check a model's declared feature names against the produced columns.
///
/// Order matters: a permutation is a mismatch.
pub fn validate_schema(model_features: &[String]) -> Result<()> {
    let actual = feature_columns();
    if model_features == actual.as_slice() {
        return Ok(());
    }

    Err(RealtyError::SchemaMismatch { expected: model_features.to_vec(), actual })
}
