use realty_core::models::{Coordinate, ListingRecord};
use realty_geo::PoiContext;

/// Overwrite raw `dist_*`/`qtd_*` columns with values queried from the context.
///
/// Only listings carrying a valid location are touched; the others keep
/// whatever the source table held. Returns the number of listings enriched.
pub fn enrich_listings(listings: &mut [ListingRecord], context: &PoiContext) -> usize {
    let locations: Vec<Option<Coordinate>> = listings.iter().map(|l| l.location).collect();
    let vectors = context.proximity_bulk(&locations);

    let mut enriched = 0usize;
    for (row, (listing, vector)) in listings.iter_mut().zip(vectors).enumerate() {
        let Some(vector) = vector else {
            if let Some(location) = listing.location {
                tracing::warn!(row, "Skipping enrichment for invalid location {}", location);
            }
            continue;
        };

        for (category, feature) in vector.iter() {
            let entry = listing.proximity.get_mut(category);
            entry.distance_m = feature.nearest_distance_m;
            entry.count = Some(f64::from(feature.count_within_radius));
        }
        enriched += 1;
    }

    tracing::info!(total = listings.len(), enriched, "Enriched listings with proximity features");
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_core::models::{PoiCategory, RawProximityEntry};

    #[test]
    fn test_only_located_listings_are_enriched() {
        let poi = Coordinate::new(-25.0945, -50.1633);
        let context = PoiContext::from_coordinates(vec![(PoiCategory::Pharmacy, poi)]);

        let stale = RawProximityEntry { distance_m: Some(9999.0), count: Some(7.0) };
        let mut listings = vec![
            ListingRecord { location: Some(poi), ..Default::default() },
            ListingRecord::default(),
            ListingRecord { location: Some(Coordinate::new(f64::NAN, 0.0)), ..Default::default() },
        ];
        for listing in &mut listings {
            *listing.proximity.get_mut(PoiCategory::Pharmacy) = stale;
        }

        let enriched = enrich_listings(&mut listings, &context);

        assert_eq!(enriched, 1);
        let pharmacy = listings[0].proximity.get(PoiCategory::Pharmacy);
        assert_eq!(pharmacy.distance_m, Some(0.0));
        assert_eq!(pharmacy.count, Some(1.0));
        // Empty categories follow the no-data rule
        assert_eq!(listings[0].proximity.get(PoiCategory::Park).distance_m, None);
        assert_eq!(listings[0].proximity.get(PoiCategory::Park).count, Some(0.0));

        assert_eq!(*listings[1].proximity.get(PoiCategory::Pharmacy), stale);
        assert_eq!(*listings[2].proximity.get(PoiCategory::Pharmacy), stale);
    }
}
