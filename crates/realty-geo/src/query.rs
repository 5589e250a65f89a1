//! Proximity queries: nearest distance and radius count per category.

use crate::index::SpatialIndex;
use realty_core::models::{
    CategoryConfig, Coordinate, PoiCategory, ProximityFeature, ProximityFeatureVector,
};

/// Query one category's index for a target location
pub fn query_category(
    index: &SpatialIndex,
    config: &CategoryConfig,
    target: &Coordinate,
) -> ProximityFeature {
    if index.is_empty() {
        return ProximityFeature::EMPTY;
    }

    ProximityFeature {
        nearest_distance_m: index.nearest_distance_m(target),
        count_within_radius: index.count_within(target, config.radius_m),
    }
}

/// Query every category, walking the configuration table once
pub fn query_proximity(indices: &[SpatialIndex; 7], target: &Coordinate) -> ProximityFeatureVector {
    let entries = PoiCategory::ALL.map(|category| {
        query_category(&indices[category.index()], category.config(), target)
    });

    tracing::debug!(location = %target, "Computed proximity features");

    ProximityFeatureVector { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::EARTH_RADIUS_M;

    fn target() -> Coordinate {
        Coordinate::new(-25.0945, -50.1633)
    }

    fn east_of(origin: Coordinate, meters: f64) -> Coordinate {
        let dlon = (meters / (EARTH_RADIUS_M * origin.lat.to_radians().cos())).to_degrees();
        Coordinate::new(origin.lat, origin.lon + dlon)
    }

    #[test]
    fn test_empty_category_degrades() {
        let feature = query_category(&SpatialIndex::new(), PoiCategory::Park.config(), &target());
        assert_eq!(feature, ProximityFeature::EMPTY);
    }

    #[test]
    fn test_category_radius_is_applied() {
        // 400m away: inside the 500m market radius, outside the 300m pharmacy radius
        let index = SpatialIndex::from_coordinates(&[east_of(target(), 400.0)]);

        let market = query_category(&index, PoiCategory::Market.config(), &target());
        let pharmacy = query_category(&index, PoiCategory::Pharmacy.config(), &target());

        assert_eq!(market.count_within_radius, 1);
        assert_eq!(pharmacy.count_within_radius, 0);
        assert_eq!(market.nearest_distance_m, pharmacy.nearest_distance_m);
    }

    #[test]
    fn test_query_proximity_covers_every_category() {
        let mut indices: [SpatialIndex; 7] = Default::default();
        indices[PoiCategory::Hospital.index()] =
            SpatialIndex::from_coordinates(&[east_of(target(), 900.0)]);

        let vector = query_proximity(&indices, &target());

        for (category, feature) in vector.iter() {
            if category == PoiCategory::Hospital {
                assert_eq!(feature.count_within_radius, 1);
                assert!(feature.nearest_distance_m.is_some());
            } else {
                assert_eq!(*feature, ProximityFeature::EMPTY);
            }
        }
    }
}
