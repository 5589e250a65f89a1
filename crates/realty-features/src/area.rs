use realty_core::models::AreaBucket;

/// Bucket an area in m².
///
/// Bins are right-closed: `[0, 50]`, `(50, 80]`, `(80, 120]`, `(120, 200]`,
/// `(200, 400]`, `(400, ∞)`. Missing, NaN, or negative areas get no bucket.
pub fn area_bucket(area_m2: Option<f64>) -> Option<AreaBucket> {
    let area = area_m2.filter(|a| !a.is_nan() && *a >= 0.0)?;

    AreaBucket::ALL
        .into_iter()
        .find(|bucket| bucket.upper_edge().map_or(true, |edge| area <= edge))
}
