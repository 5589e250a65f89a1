use realty_core::error::{RealtyError, Result};
use realty_core::models::Coordinate;
use realty_core::ports::Geocoder;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("realty/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim search API geocoder
pub struct NominatimGeocoder {
    /// Base URL of the Nominatim instance (e.g., "https://nominatim.openstreetmap.org")
    base_url: String,

    /// Appended to every query to keep results inside one city
    city: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a new Nominatim geocoder
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RealtyError::ConfigMissing { key: "geocoder_url".to_string() });
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RealtyError::ConfigInvalid {
                key: "geocoder_url".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { base_url, city: None, client })
    }

    /// Scope every query to a city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Free-text query sent to the service
    pub fn query_for(&self, address: &str) -> String {
        match &self.city {
            Some(city) => format!("{}, {}", address.trim(), city),
            None => address.trim().to_string(),
        }
    }

    fn search_url(&self, query: &str) -> std::result::Result<reqwest::Url, String> {
        reqwest::Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[("q", query), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| format!("invalid geocoder URL: {}", e))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate> {
        let failed = |reason: String| RealtyError::GeocodingFailed {
            address: address.to_string(),
            reason,
        };

        if address.trim().is_empty() {
            return Err(failed("empty address".to_string()));
        }

        let query = self.query_for(address);
        let url = self.search_url(&query).map_err(&failed)?;

        // Use tokio runtime to execute async request
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| failed(format!("Failed to create async runtime: {}", e)))?;

        let body = runtime.block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| failed(format!("Failed to reach {}: {}", self.base_url, e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(failed(format!("Nominatim API error ({}): {}", status, error_text)));
            }

            response.text().await.map_err(|e| failed(format!("Failed to read response: {}", e)))
        })?;

        let coordinate = parse_search_response(&body).map_err(failed)?;
        tracing::debug!(query = %query, location = %coordinate, "Geocoded address");
        Ok(coordinate)
    }
}

/// One result of the Nominatim search API; coordinates come back as strings
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Extract the first result's coordinate from a search response body.
///
/// Returns the failure reason on an empty result list, a malformed body, or
/// an out-of-range coordinate.
pub fn parse_search_response(body: &str) -> std::result::Result<Coordinate, String> {
    let results: Vec<SearchResult> =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse Nominatim response: {}", e))?;

    let first = results.into_iter().next().ok_or_else(|| "no results".to_string())?;

    let lat: f64 = first.lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", first.lat))?;
    let lon: f64 = first.lon.trim().parse().map_err(|_| format!("invalid longitude '{}'", first.lon))?;

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_valid() {
        return Err(format!("coordinate {} out of range", coordinate));
    }
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_result() {
        let body = r#"[
            {"place_id": 1, "lat": "-25.0950421", "lon": "-50.1619148", "display_name": "Centro"},
            {"place_id": 2, "lat": "-25.2", "lon": "-50.2", "display_name": "Other"}
        ]"#;

        let coordinate = parse_search_response(body).unwrap();
        assert_eq!(coordinate, Coordinate::new(-25.0950421, -50.1619148));
    }

    #[test]
    fn test_empty_results_fail() {
        assert_eq!(parse_search_response("[]").unwrap_err(), "no results");
    }

    #[test]
    fn test_malformed_bodies_fail() {
        assert!(parse_search_response("<html>rate limited</html>").is_err());
        assert!(parse_search_response(r#"[{"lat": "north", "lon": "-50.1"}]"#).is_err());
        assert!(parse_search_response(r#"[{"lat": "95.0", "lon": "-50.1"}]"#).is_err());
    }

    #[test]
    fn test_query_appends_city() {
        let geocoder = NominatimGeocoder::new("https://nominatim.example/").unwrap();
        assert_eq!(geocoder.query_for(" Rua XV de Novembro "), "Rua XV de Novembro");

        let geocoder = geocoder.with_city("Ponta Grossa, PR");
        assert_eq!(geocoder.query_for("Rua XV de Novembro"), "Rua XV de Novembro, Ponta Grossa, PR");
    }

    #[test]
    fn test_search_url_is_encoded() {
        let geocoder = NominatimGeocoder::new("https://nominatim.example/").unwrap();
        let url = geocoder.search_url("Rua A, Centro").unwrap();

        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "Rua A, Centro".to_string())));
        assert!(pairs.contains(&("format".to_string(), "json".to_string())));
    }

    #[test]
    fn test_empty_address_fails_without_request() {
        let geocoder = NominatimGeocoder::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(geocoder.geocode("   "), Err(RealtyError::GeocodingFailed { .. })));
    }

    #[test]
    fn test_blank_base_url_is_missing_config() {
        let err = NominatimGeocoder::new("  ").err().unwrap();
        assert!(matches!(err, RealtyError::ConfigMissing { key } if key == "geocoder_url"));
    }
}
