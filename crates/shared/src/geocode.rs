//! Geocoding client for map plotting.
//!
//! Wraps a Nominatim-compatible search endpoint. A failed lookup is an
//! error for the single address only; callers log it and omit the point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeocodingConfig;

/// Geocoding errors.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The HTTP client could not be built.
    #[error("Failed to build geocoding client: {0}")]
    Client(String),
    /// The lookup request failed.
    #[error("Geocoding request failed: {0}")]
    Request(String),
    /// The service answered but no coordinates matched the address.
    #[error("No match for address: {0}")]
    NoMatch(String),
    /// The response body could not be parsed.
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Geographic coordinates for a free-text address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: Decimal,
    /// Longitude in decimal degrees.
    pub longitude: Decimal,
}

/// One candidate row in a Nominatim-style response.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(with = "rust_decimal::serde::str")]
    lat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    lon: Decimal,
}

/// Geocoding service backed by an HTTP search endpoint.
#[derive(Debug, Clone)]
pub struct GeoService {
    client: reqwest::Client,
    config: GeocodingConfig,
}

impl GeoService {
    /// Creates a new geocoding service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeoError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Resolves a free-text address to coordinates.
    ///
    /// Returns the first candidate the service offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response cannot be parsed,
    /// or no candidate matches the address.
    pub async fn geocode(&self, address: &str) -> Result<GeoPoint, GeoError> {
        let mut request = self
            .client
            .get(&self.config.base_url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")]);

        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeoError::Request(e.to_string()))?;

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        hits.into_iter()
            .next()
            .map(|hit| GeoPoint {
                latitude: hit.lat,
                longitude: hit.lon,
            })
            .ok_or_else(|| GeoError::NoMatch(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_search_hit() {
        let body = r#"[{"lat":"38.8893","lon":"-77.0502"}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lat, dec!(38.8893));
        assert_eq!(hits[0].lon, dec!(-77.0502));
    }

    #[test]
    fn test_empty_response_is_no_match() {
        let hits: Vec<SearchHit> = serde_json::from_str("[]").unwrap();
        let point = hits.into_iter().next();
        assert!(point.is_none());
    }

    #[test]
    fn test_geo_point_serializes_both_axes() {
        let point = GeoPoint {
            latitude: dec!(38.8893),
            longitude: dec!(-77.0502),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["latitude"], serde_json::json!("38.8893"));
        assert_eq!(json["longitude"], serde_json::json!("-77.0502"));
    }
}
