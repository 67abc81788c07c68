//! World Air Quality Index (aqicn.org) feed source
//!
//! Uses the "feed by geo" endpoint, which answers with the station closest
//! to the given coordinates.
//! API documentation: https://aqicn.org/json-api/doc/

use crate::constants::api::WAQI_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::station::StationSource;
use tracing::debug;

/// WAQI feed source
#[derive(Debug, Clone)]
pub struct WaqiSource {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl WaqiSource {
    /// Create a source using the given HTTP client and API token
    pub fn new(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: WAQI_URL.to_string(),
        }
    }

    /// Point the source at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn feed_url(&self, coordinate: Coordinates) -> String {
        format!(
            "{}/feed/geo:{};{}/?token={}",
            self.base_url.trim_end_matches('/'),
            coordinate.lat,
            coordinate.lng,
            urlencoding::encode(&self.token)
        )
    }
}

impl StationSource for WaqiSource {
    async fn feed(&self, coordinate: Coordinates) -> Result<serde_json::Value> {
        debug!("WAQI feed lookup for {}", coordinate);

        let response = self
            .client
            .get(self.feed_url(coordinate))
            .send()
            .await
            .map_err(|e| Error::Provider(format!("WAQI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "WAQI returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse WAQI response: {}", e)))
    }
}
