use realty_core::error::{RealtyError, Result};
use realty_core::models::{Coordinate, PredictionRecord, StructuralAttributes};
use realty_core::ports::{Geocoder, PredictionSink, PriceModel};
use realty_geo::ContextHandle;
use std::sync::Arc;

use crate::inference::{adapt, InferenceInput};
use crate::schema::validate_schema;

/// Prediction service wiring the inference adapter to its collaborators
pub struct Predictor<M, G, S>
where
    M: PriceModel,
    G: Geocoder,
    S: PredictionSink,
{
    model: M,
    geocoder: G,
    sink: S,
    context: Arc<ContextHandle>,
    city: Option<String>,
}

impl<M, G, S> Predictor<M, G, S>
where
    M: PriceModel,
    G: Geocoder,
    S: PredictionSink,
{
    /// Create a predictor.
    ///
    /// Fails with `SchemaMismatch` when the model was fitted on a different
    /// feature list than the adapter produces.
    pub fn new(model: M, geocoder: G, sink: S, context: Arc<ContextHandle>) -> Result<Self> {
        validate_schema(&model.feature_names())?;

        let identity = model.identity();
        tracing::info!(model = %identity.name, version = %identity.version, "Predictor ready");

        Ok(Self { model, geocoder, sink, context, city: None })
    }

    /// Tag every prediction with a city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Geocode an address and predict there
    pub fn predict_address(
        &self,
        structural: StructuralAttributes,
        address: &str,
    ) -> Result<PredictionRecord> {
        let location = self.geocoder.geocode(address)?;
        tracing::debug!(address, location = %location, "Geocoded address");
        self.predict_at(structural, Some(location))
    }

    /// Predict at a known location
    pub fn predict_at(
        &self,
        structural: StructuralAttributes,
        location: Option<Coordinate>,
    ) -> Result<PredictionRecord> {
        let location = location.ok_or(RealtyError::LocationMissing)?;
        self.predict(&InferenceInput::at(structural, location))
    }

    /// Predict from a raw inference request against the current POI context.
    ///
    /// A request with neither precomputed scores nor a location fails with
    /// `LocationMissing`; nothing is sent to the sink.
    pub fn predict(&self, input: &InferenceInput) -> Result<PredictionRecord> {
        if input.scores.is_none() && input.location.is_none() {
            return Err(RealtyError::LocationMissing);
        }

        let context = self.context.current();
        let features = adapt(input, &context)?;

        let log_price = self.model.predict_log_price(&features)?;
        let mut record = PredictionRecord::new(features, log_price, self.model.identity());
        if let Some(city) = &self.city {
            record = record.with_city(city.clone());
        }

        self.sink.record(&record)?;
        tracing::info!(id = %record.id, price = record.predicted_price, "Recorded prediction");

        Ok(record)
    }
}
