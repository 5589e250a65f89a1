//! Property tests for the spatial index
//!
//! The indexed nearest distance and radius count must agree with a brute-force
//! haversine scan over the same points.

use proptest::prelude::*;
use realty_core::models::{Coordinate, PoiCategory};
use realty_geo::{haversine_m, PoiContext, SpatialIndex};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-25.2f64..-25.0, -50.3f64..-50.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

fn brute_nearest(points: &[Coordinate], target: &Coordinate) -> Option<f64> {
    points.iter().map(|p| haversine_m(target, p)).reduce(f64::min)
}

fn brute_count(points: &[Coordinate], target: &Coordinate, radius_m: f64) -> u32 {
    points.iter().filter(|p| haversine_m(target, p) <= radius_m).count() as u32
}

proptest! {
    #[test]
    fn nearest_matches_brute_force(
        points in prop::collection::vec(coordinate(), 1..60),
        target in coordinate(),
    ) {
        let index = SpatialIndex::from_coordinates(&points);
        let expected = brute_nearest(&points, &target).unwrap();
        let actual = index.nearest_distance_m(&target).unwrap();
        prop_assert!((expected - actual).abs() < 1e-6, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn count_matches_brute_force(
        points in prop::collection::vec(coordinate(), 0..60),
        target in coordinate(),
        radius in 0.0f64..5000.0,
    ) {
        let index = SpatialIndex::from_coordinates(&points);
        prop_assert_eq!(index.count_within(&target, radius), brute_count(&points, &target, radius));
    }

    #[test]
    fn count_is_monotone_in_radius(
        points in prop::collection::vec(coordinate(), 0..40),
        target in coordinate(),
        small in 0.0f64..2000.0,
        extra in 0.0f64..2000.0,
    ) {
        let index = SpatialIndex::from_coordinates(&points);
        prop_assert!(index.count_within(&target, small) <= index.count_within(&target, small + extra));
    }

    #[test]
    fn context_uses_category_radius(
        points in prop::collection::vec(coordinate(), 0..40),
        target in coordinate(),
    ) {
        let context = PoiContext::from_coordinates(points.iter().map(|p| (PoiCategory::Hospital, *p)));
        let vector = context.proximity(&target).unwrap();
        let hospital = vector.get(PoiCategory::Hospital);

        prop_assert_eq!(hospital.count_within_radius, brute_count(&points, &target, 1000.0));
        prop_assert_eq!(hospital.nearest_distance_m.is_some(), !points.is_empty());
    }
}

#[test]
fn test_empty_index_has_no_nearest() {
    let index = SpatialIndex::from_coordinates(&[]);
    let target = Coordinate::new(-25.09, -50.16);
    assert_eq!(index.nearest_distance_m(&target), None);
    assert_eq!(index.count_within(&target, 1_000_000.0), 0);
}
