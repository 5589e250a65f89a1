use crate::distance::{chord_length, haversine_angle, unit_vector, EARTH_RADIUS_M};
use realty_core::models::Coordinate;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Slack added to chord comparisons so float noise never hides a candidate.
/// The exact haversine check decides membership afterwards.
const CHORD_EPSILON: f64 = 1e-12;

/// Indexed POI position
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoi {
    lat_rad: f64,
    lon_rad: f64,

    /// Point on the unit sphere
    position: [f64; 3],
}

impl IndexedPoi {
    fn new(coordinate: &Coordinate) -> Self {
        let (lat_rad, lon_rad) = coordinate.to_radians();
        Self { lat_rad, lon_rad, position: unit_vector(lat_rad, lon_rad) }
    }

    /// Haversine distance in meters from a target given in radians
    fn distance_m(&self, lat_rad: f64, lon_rad: f64) -> f64 {
        haversine_angle(lat_rad, lon_rad, self.lat_rad, self.lon_rad) * EARTH_RADIUS_M
    }
}

impl RTreeObject for IndexedPoi {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoi {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Spherical nearest-neighbour index over one category's POIs.
///
/// Points live on the unit sphere; chord length is monotone in great-circle
/// distance, so the R-tree's Euclidean ordering is the haversine ordering.
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoi>,
}

impl SpatialIndex {
    /// Create a new empty spatial index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index from coordinates; invalid coordinates are skipped
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Self {
        let indexed: Vec<IndexedPoi> = coordinates
            .iter()
            .enumerate()
            .filter(|(id, c)| {
                let valid = c.is_valid();
                if !valid {
                    tracing::debug!(id, "Skipping invalid coordinate {}", c);
                }
                valid
            })
            .map(|(_, c)| IndexedPoi::new(c))
            .collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Haversine distance in meters to the closest POI, `None` when empty
    pub fn nearest_distance_m(&self, target: &Coordinate) -> Option<f64> {
        let (lat, lon) = target.to_radians();
        let query = unit_vector(lat, lon);

        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, first_d2) = candidates.next()?;
        let cutoff = first_d2.sqrt() + CHORD_EPSILON;

        let mut best = first.distance_m(lat, lon);
        for (poi, d2) in candidates {
            if d2.sqrt() > cutoff {
                break;
            }
            best = best.min(poi.distance_m(lat, lon));
        }

        Some(best)
    }

    /// Number of POIs whose haversine distance to the target is `<= radius_m`
    pub fn count_within(&self, target: &Coordinate, radius_m: f64) -> u32 {
        if radius_m < 0.0 || self.is_empty() {
            return 0;
        }

        let (lat, lon) = target.to_radians();
        let query = unit_vector(lat, lon);
        let chord = chord_length(radius_m) + CHORD_EPSILON;

        let count = self
            .tree
            .locate_within_distance(query, chord * chord)
            .filter(|poi| poi.distance_m(lat, lon) <= radius_m)
            .count();

        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Get the total number of POIs in the index
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating spatial indexes
pub struct SpatialIndexBuilder {
    coordinates: Vec<Coordinate>,
}

impl SpatialIndexBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { coordinates: Vec::new() }
    }

    /// Add a coordinate to the builder
    pub fn add(mut self, coordinate: Coordinate) -> Self {
        self.coordinates.push(coordinate);
        self
    }

    /// Add multiple coordinates to the builder
    pub fn add_many(mut self, coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        self.coordinates.extend(coordinates);
        self
    }

    /// Build the spatial index
    pub fn build(self) -> SpatialIndex {
        SpatialIndex::from_coordinates(&self.coordinates)
    }
}

impl Default for SpatialIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine_m;

    /// Coordinate `meters` due north of `origin`
    fn north_of(origin: Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(origin.lat + (meters / EARTH_RADIUS_M).to_degrees(), origin.lon)
    }

    fn origin() -> Coordinate {
        Coordinate::new(-25.0945, -50.1633)
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.nearest_distance_m(&origin()), None);
        assert_eq!(index.count_within(&origin(), 1000.0), 0);
    }

    #[test]
    fn test_builder() {
        let index = SpatialIndexBuilder::new()
            .add(north_of(origin(), 100.0))
            .add_many(vec![north_of(origin(), 200.0), north_of(origin(), 300.0)])
            .build();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_invalid_coordinates_are_skipped() {
        let index = SpatialIndex::from_coordinates(&[origin(), Coordinate::new(f64::NAN, 0.0)]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_nearest_distance() {
        let index = SpatialIndex::from_coordinates(&[
            north_of(origin(), 800.0),
            north_of(origin(), 300.0),
            north_of(origin(), 1500.0),
        ]);

        let d = index.nearest_distance_m(&origin()).unwrap();
        assert!((d - 300.0).abs() < 1e-6, "got {}", d);
    }

    #[test]
    fn test_count_within_radius() {
        let index = SpatialIndex::from_coordinates(&[
            north_of(origin(), 100.0),
            north_of(origin(), 450.0),
            north_of(origin(), 600.0),
        ]);

        assert_eq!(index.count_within(&origin(), 500.0), 2);
        assert_eq!(index.count_within(&origin(), 50.0), 0);
        assert_eq!(index.count_within(&origin(), 10_000.0), 3);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let poi = north_of(origin(), 500.0);
        let exact = haversine_m(&origin(), &poi);
        let index = SpatialIndex::from_coordinates(&[poi]);

        assert_eq!(index.count_within(&origin(), exact), 1);
        assert_eq!(index.count_within(&origin(), exact - 1e-6), 0);
    }

    #[test]
    fn test_duplicate_points_are_counted_separately() {
        let index = SpatialIndex::from_coordinates(&[origin(), origin()]);
        assert_eq!(index.count_within(&origin(), 0.0), 2);
        assert_eq!(index.nearest_distance_m(&origin()), Some(0.0));
    }
}
