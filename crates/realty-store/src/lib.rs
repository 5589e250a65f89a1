//! Realty Store - Table adapters and prediction sinks
//!
//! This crate reads POI source tables and listing tables from CSV, writes the
//! assembled training table, and provides implementations of the
//! `PredictionSink` port.

mod columns;
pub mod listings;
pub mod memory;
pub mod poi_source;
pub mod table;

pub use listings::{read_listings, read_listings_from};
pub use memory::{JsonLinesPredictionSink, MemoryPredictionSink};
pub use poi_source::{load_poi_records, PoiSourceFile, POI_SOURCE_FILES};
pub use table::{write_training_table, write_training_table_to};
