//! Realty Geocode - HTTP adapters for the `Geocoder` port

pub mod nominatim;

pub use nominatim::{parse_search_response, NominatimGeocoder};
