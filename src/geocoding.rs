use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::trip::GpsPoint;

pub const DEFAULT_API_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Bounded timeout so an unreachable provider can't stall a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Transport-level failure: connection, timeout, non-success status.
    #[error("postcode lookup failed: {0}")]
    LookupFailed(String),
    /// The provider answered but the body was not what we expect.
    #[error("failed to decode geocoding response: {0}")]
    DecodeFailed(String),
}

/// Reverse geocoding as a capability, so the query service can hold a real
/// provider in production and a canned one in tests.
#[async_trait]
pub trait ReverseGeocode: Send + Sync {
    /// Resolves a fix to a human-readable postcode label. An empty label
    /// with no error means the provider had no match for the coordinate,
    /// which is a valid outcome and distinct from a failed lookup.
    async fn reverse_geocode(&self, point: &GpsPoint) -> Result<String, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    text: String,
}

/// Mapbox-backed implementation of [`ReverseGeocode`].
pub struct MapboxGeocoder {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl MapboxGeocoder {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(MapboxGeocoder {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ReverseGeocode for MapboxGeocoder {
    async fn reverse_geocode(&self, point: &GpsPoint) -> Result<String, GeocodeError> {
        // mapbox wants longitude first
        let url = format!(
            "{}/{},{}.json?types=postcode&limit=1&access_token={}",
            self.base_url, point.longitude, point.latitude, self.access_token
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GeocodeError::LookupFailed(e.to_string()))?;

        let decoded: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::DecodeFailed(e.to_string()))?;

        match decoded.features.into_iter().next() {
            Some(feature) => Ok(feature.text),
            // no candidates for this coordinate, not a failure
            None => Ok(String::new()),
        }
    }
}
