//! Error types for the proximity feature engine

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtyError {
    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Source data errors
    #[error("POI source not found at {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    // Dataset errors
    #[error("Cannot impute column {column}: no observed values after filtering")]
    EmptyColumnMedian { column: String },

    #[error("Feature schema mismatch: model expects {expected:?}, adapter produces {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    // Inference errors
    #[error("Geocoding failed for '{address}': {reason}")]
    GeocodingFailed { address: String, reason: String },

    #[error("No location available for the request")]
    LocationMissing,

    #[error("Invalid location {coordinate}: latitude/longitude out of range")]
    InvalidLocation { coordinate: String },

    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RealtyError>;
