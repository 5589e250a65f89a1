//! Immutable POI context and its atomically swappable handle.

use crate::geometry::{extract_records, Extraction};
use crate::index::SpatialIndex;
use crate::query::query_proximity;
use rayon::prelude::*;
use realty_core::error::{RealtyError, Result};
use realty_core::models::{Coordinate, PoiCategory, PoiRecord, ProximityFeatureVector};
use std::sync::{Arc, PoisonError, RwLock};

/// Per-category build statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: PoiCategory,

    /// POIs in the index
    pub indexed: usize,

    /// Rows dropped during geometry extraction
    pub dropped: usize,
}

/// All category indices, built once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct PoiContext {
    indices: [SpatialIndex; 7],
    dropped: [usize; 7],
}

impl PoiContext {
    /// Context with no POIs; every query degrades to the empty sentinels
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extract coordinates from raw records and build every index
    pub fn from_records(records: &[PoiRecord]) -> Self {
        Self::from_extraction(extract_records(records))
    }

    /// Build every index from an extraction result
    pub fn from_extraction(extraction: Extraction) -> Self {
        let Extraction { coordinates, dropped } = extraction;
        let indices = coordinates.map(|coords| SpatialIndex::from_coordinates(&coords));
        let context = Self { indices, dropped };

        for summary in context.summary() {
            tracing::info!(
                category = %summary.category,
                indexed = summary.indexed,
                dropped = summary.dropped,
                "Built POI index"
            );
        }

        context
    }

    /// Build from (category, coordinate) pairs
    pub fn from_coordinates(points: impl IntoIterator<Item = (PoiCategory, Coordinate)>) -> Self {
        let mut extraction = Extraction::default();
        for (category, coordinate) in points {
            extraction.coordinates[category.index()].push(coordinate);
        }
        Self::from_extraction(extraction)
    }

    pub fn index(&self, category: PoiCategory) -> &SpatialIndex {
        &self.indices[category.index()]
    }

    /// Proximity features for one target location
    pub fn proximity(&self, target: &Coordinate) -> Result<ProximityFeatureVector> {
        if !target.is_valid() {
            return Err(RealtyError::InvalidLocation { coordinate: target.to_string() });
        }
        Ok(query_proximity(&self.indices, target))
    }

    /// Proximity features for many targets in parallel.
    ///
    /// Missing or invalid locations yield `None` in the same position.
    pub fn proximity_bulk(&self, targets: &[Option<Coordinate>]) -> Vec<Option<ProximityFeatureVector>> {
        targets
            .par_iter()
            .map(|target| target.as_ref().and_then(|t| self.proximity(t).ok()))
            .collect()
    }

    /// Build statistics per category, in table order
    pub fn summary(&self) -> Vec<CategorySummary> {
        PoiCategory::ALL
            .iter()
            .map(|&category| CategorySummary {
                category,
                indexed: self.indices[category.index()].len(),
                dropped: self.dropped[category.index()],
            })
            .collect()
    }

    pub fn total_indexed(&self) -> usize {
        self.indices.iter().map(SpatialIndex::len).sum()
    }
}

/// Shared handle to the current context.
///
/// Readers take an `Arc` snapshot; `reload` replaces the whole context in one
/// swap, so a reader sees either the old or the new context, never a mix.
#[derive(Debug)]
pub struct ContextHandle {
    current: RwLock<Arc<PoiContext>>,
}

impl ContextHandle {
    pub fn new(context: PoiContext) -> Self {
        Self { current: RwLock::new(Arc::new(context)) }
    }

    /// Snapshot of the current context
    pub fn current(&self) -> Arc<PoiContext> {
        // The guarded value is a single Arc; a poisoned lock still holds a whole context.
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swap in a fully built context, returning the previous one
    pub fn reload(&self, context: PoiContext) -> Arc<PoiContext> {
        let next = Arc::new(context);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(pois = guard.total_indexed(), "Reloaded POI context");
        previous
    }
}

impl Default for ContextHandle {
    fn default() -> Self {
        Self::new(PoiContext::empty())
    }
}
