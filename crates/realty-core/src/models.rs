pub mod dataset;
pub mod features;
pub mod listing;
pub mod poi;
pub mod prediction;

pub use dataset::{TrainingRow, TrainingTable, TARGET_COLUMN};
pub use features::{
    FeatureRow, FeatureValue, ProximityFeature, ProximityFeatureVector, ProximityScores,
};
pub use listing::{
    AreaBucket, ListingRecord, PropertyType, RawProximity, RawProximityEntry,
    StructuralAttributes,
};
pub use poi::{CategoryConfig, Coordinate, PoiCategory, PoiRecord};
pub use prediction::{price_from_log, ModelIdentity, PredictionRecord};
