//! Geometry extraction: WKT point or polygon to a canonical coordinate.

use geo::{Centroid, Geometry as GeoGeometry, HasDimensions};
use realty_core::error::{RealtyError, Result};
use realty_core::models::{Coordinate, PoiCategory, PoiRecord};
use wkt::TryFromWkt;

/// Extract a (lat, lon) pair from WKT.
///
/// Points map directly (`POINT(x y)` is lon/lat). Polygons map to their
/// geometric centroid. Every other geometry type is rejected.
pub fn extract_coordinate(text: &str) -> Result<Coordinate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty geometry text"));
    }

    let geometry = GeoGeometry::<f64>::try_from_wkt_str(trimmed)
        .map_err(|e| invalid(format!("unparseable WKT: {}", e)))?;
    if geometry.is_empty() {
        return Err(invalid("empty geometry"));
    }

    let point = match &geometry {
        GeoGeometry::Point(point) => *point,
        GeoGeometry::Polygon(polygon) => {
            polygon.centroid().ok_or_else(|| invalid("polygon has no centroid"))?
        }
        other => {
            return Err(invalid(format!("unsupported geometry type {}", geometry_kind(other))))
        }
    };

    let coordinate = Coordinate::new(point.y(), point.x());
    if !coordinate.is_valid() {
        return Err(invalid(format!("coordinate {} out of range", coordinate)));
    }

    Ok(coordinate)
}

fn invalid(reason: impl Into<String>) -> RealtyError {
    RealtyError::InvalidGeometry { reason: reason.into() }
}

fn geometry_kind(geometry: &GeoGeometry<f64>) -> &'static str {
    match geometry {
        GeoGeometry::Point(_) => "Point",
        GeoGeometry::Line(_) => "Line",
        GeoGeometry::LineString(_) => "LineString",
        GeoGeometry::Polygon(_) => "Polygon",
        GeoGeometry::MultiPoint(_) => "MultiPoint",
        GeoGeometry::MultiLineString(_) => "MultiLineString",
        GeoGeometry::MultiPolygon(_) => "MultiPolygon",
        GeoGeometry::GeometryCollection(_) => "GeometryCollection",
        GeoGeometry::Rect(_) => "Rect",
        GeoGeometry::Triangle(_) => "Triangle",
    }
}

/// Usable coordinates per category after extraction
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Coordinates ordered like [`PoiCategory::ALL`]
    pub coordinates: [Vec<Coordinate>; 7],

    /// Rows dropped per category
    pub dropped: [usize; 7],
}

impl Extraction {
    pub fn coordinates(&self, category: PoiCategory) -> &[Coordinate] {
        &self.coordinates[category.index()]
    }

    pub fn dropped(&self, category: PoiCategory) -> usize {
        self.dropped[category.index()]
    }

    pub fn total_dropped(&self) -> usize {
        self.dropped.iter().sum()
    }
}

/// Resolve a coordinate for every record, dropping the ones that fail.
///
/// Never fails as a whole: bad rows are logged and counted, the rest of the
/// category stays usable.
pub fn extract_records(records: &[PoiRecord]) -> Extraction {
    let mut extraction = Extraction::default();

    for (row, record) in records.iter().enumerate() {
        let slot = record.category.index();
        match resolve(record) {
            Ok(coordinate) => extraction.coordinates[slot].push(coordinate),
            Err(e) => {
                tracing::warn!(category = %record.category, row, "Dropping POI: {}", e);
                extraction.dropped[slot] += 1;
            }
        }
    }

    extraction
}

fn resolve(record: &PoiRecord) -> Result<Coordinate> {
    match (&record.coordinate, &record.geometry) {
        (Some(coordinate), _) if coordinate.is_valid() => Ok(*coordinate),
        (Some(coordinate), _) => Err(invalid(format!("coordinate {} out of range", coordinate))),
        (None, Some(text)) => extract_coordinate(text),
        (None, None) => Err(invalid("no geometry")),
    }
}
