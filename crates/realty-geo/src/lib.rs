//! Realty Geo - Geometry extraction, spatial indexing, and proximity queries
//!
//! This crate turns POI geometries into coordinates, builds one spherical
//! nearest-neighbour index per category, and answers nearest-distance and
//! radius-count queries against them.

pub mod context;
pub mod distance;
pub mod geometry;
pub mod index;
pub mod query;

pub use context::{CategorySummary, ContextHandle, PoiContext};
pub use distance::{haversine_m, EARTH_RADIUS_M};
pub use geometry::{extract_coordinate, extract_records, Extraction};
pub use index::{SpatialIndex, SpatialIndexBuilder};
pub use query::{query_category, query_proximity};
