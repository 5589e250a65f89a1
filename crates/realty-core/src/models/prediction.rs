use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::features::FeatureRow;

/// Identity of the trained pipeline that produced a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    pub name: String,
    pub version: String,
}

impl ModelIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into() }
    }
}

/// Prediction handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,

    /// Feature payload sent to the model
    pub features: FeatureRow,

    /// Model output
    pub log_price: f64,

    /// `exp(log_price)` rounded to cents
    pub predicted_price: f64,

    pub model: ModelIdentity,

    /// City the request was scoped to, if any
    pub city: Option<String>,

    pub predicted_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(features: FeatureRow, log_price: f64, model: ModelIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            features,
            log_price,
            predicted_price: price_from_log(log_price),
            model,
            city: None,
            predicted_at: Utc::now(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Convert a log-price back to currency, rounded to two decimals
pub fn price_from_log(log_price: f64) -> f64 {
    (log_price.exp() * 100.0).round() / 100.0
}
