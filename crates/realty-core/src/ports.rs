//! Port trait definitions
//!
//! These traits define the interfaces that external collaborators implement.
//! Nothing behind them is called from inside the feature engine itself.

use crate::error::Result;
use crate::models::{Coordinate, FeatureRow, ModelIdentity, PredictionRecord};

/// Port for resolving a free-text address to a coordinate
pub trait Geocoder: Send + Sync {
    /// Resolve an address
    ///
    /// # Returns
    /// The coordinate, or `RealtyError::GeocodingFailed` carrying the reason.
    /// Implementations never substitute a default location.
    fn geocode(&self, address: &str) -> Result<Coordinate>;
}

/// Port for the trained regression pipeline
pub trait PriceModel: Send + Sync {
    /// Ordered feature names the pipeline was fitted on
    fn feature_names(&self) -> Vec<String>;

    /// Predict the natural log of the sale price for one feature row
    fn predict_log_price(&self, row: &FeatureRow) -> Result<f64>;

    /// Name and version of the fitted pipeline
    fn identity(&self) -> ModelIdentity;
}

/// Port for persisting predictions
pub trait PredictionSink: Send + Sync {
    /// Store one prediction
    fn record(&self, prediction: &PredictionRecord) -> Result<()>;
}
