//! Great-circle distance on a spherical Earth.
//!
//! All angular math takes radians. Callers holding degrees go through
//! [`Coordinate::to_radians`] so the index and the query side convert identically.

use realty_core::models::Coordinate;

/// Sphere radius used for every distance in the engine
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Central angle between two points given in radians
pub fn haversine_angle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;
    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    2.0 * a.sqrt().min(1.0).asin()
}

/// Haversine distance in meters between two coordinates in degrees
pub fn haversine_m(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    haversine_angle(lat1, lon1, lat2, lon2) * EARTH_RADIUS_M
}

/// Position on the unit sphere for a point given in radians
pub fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let cos_lat = lat.cos();
    [cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin()]
}

/// Straight-line distance through the unit sphere for a surface distance in meters.
///
/// Strictly increasing on `[0, πR]`, which lets a Euclidean tree answer
/// great-circle nearest and radius queries.
pub fn chord_length(distance_m: f64) -> f64 {
    let angle = (distance_m / EARTH_RADIUS_M).clamp(0.0, std::f64::consts::PI);
    2.0 * (angle / 2.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinate::new(-25.0945, -50.1633);
        assert_eq!(haversine_m(&p, &p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * 1f64.to_radians();
        assert!((haversine_m(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(-25.09, -50.16);
        let b = Coordinate::new(-25.12, -50.11);
        assert!((haversine_m(&a, &b) - haversine_m(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodes_do_not_overflow_asin() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = haversine_m(&a, &b);
        assert!((d - EARTH_RADIUS_M * std::f64::consts::PI).abs() < 1e-3);
    }

    #[test]
    fn test_chord_matches_unit_vectors() {
        let a = Coordinate::new(-25.09, -50.16);
        let b = Coordinate::new(-25.10, -50.17);
        let (la, oa) = a.to_radians();
        let (lb, ob) = b.to_radians();
        let va = unit_vector(la, oa);
        let vb = unit_vector(lb, ob);
        let euclid = ((va[0] - vb[0]).powi(2) + (va[1] - vb[1]).powi(2) + (va[2] - vb[2]).powi(2)).sqrt();
        assert!((euclid - chord_length(haversine_m(&a, &b))).abs() < 1e-12);
    }
}
