//! Google Geocoding API backend
//!
//! Forward lookups use `?address=`, reverse lookups `?latlng=`. Both require
//! an API key.

use crate::constants::api::GOOGLE_GEOCODE_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::GeoBackend;
use serde::Deserialize;
use tracing::{debug, warn};

/// Google geocoding backend
#[derive(Debug, Clone)]
pub struct GoogleBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Geocoding API response envelope
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    error_message: Option<String>,
}

impl GeocodeResponse {
    /// First result, None on ZERO_RESULTS, error on any other status
    fn into_first(self) -> Result<Option<serde_json::Value>> {
        match self.status.as_str() {
            "OK" => Ok(self.results.into_iter().next()),
            "ZERO_RESULTS" => Ok(None),
            status => {
                let message = self.error_message.unwrap_or_default();
                warn!("Google geocoding returned {}: {}", status, message);
                Err(Error::Provider(format!(
                    "Google geocoding returned {}: {}",
                    status, message
                )))
            }
        }
    }
}

impl GoogleBackend {
    /// Create a backend using the given HTTP client and API key
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: GOOGLE_GEOCODE_URL.to_string(),
        }
    }

    /// Point the backend at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    fn reverse_url(&self, coordinate: Coordinates) -> String {
        format!(
            "{}?latlng={},{}&key={}",
            self.base_url,
            coordinate.lat,
            coordinate.lng,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn fetch(&self, url: &str) -> Result<GeocodeResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Google geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Google geocoding returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Google geocoding response: {}", e)))
    }
}

impl GeoBackend for GoogleBackend {
    async fn search(&self, query: &str) -> Result<Option<serde_json::Value>> {
        debug!("Google geocode lookup for {:?}", query);
        self.fetch(&self.search_url(query)).await?.into_first()
    }

    async fn reverse(&self, coordinate: Coordinates) -> Result<Option<String>> {
        debug!("Google reverse lookup for {}", coordinate);
        let first = self.fetch(&self.reverse_url(coordinate)).await?.into_first()?;

        Ok(first.and_then(|result| {
            result["formatted_address"].as_str().map(str::to_string)
        }))
    }
}
