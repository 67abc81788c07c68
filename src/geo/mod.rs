//! Geocoding module
//!
//! Provides forward geocoding (address to coordinates) and reverse geocoding
//! (coordinates to a display address) on top of a pluggable [`GeoBackend`].

pub mod address;
pub mod google;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A geocoded address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Coordinates of the best match
    pub coordinate: Coordinates,
    /// The provider's result object, untouched
    pub raw: serde_json::Value,
}

/// Trait for geocoding backends
///
/// Implementations talk to a single provider and perform exactly one
/// request per call.
pub trait GeoBackend: Send + Sync {
    /// Look up an address
    ///
    /// Returns the provider's best match as a raw JSON object, or None if
    /// the provider found nothing.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>>> + Send;

    /// Reverse geocode coordinates to a display address
    fn reverse(
        &self,
        coordinate: Coordinates,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Geocoding client: address normalization plus a backend
#[derive(Debug, Clone)]
pub struct GeocodingClient<B> {
    backend: B,
}

impl<B: GeoBackend> GeocodingClient<B> {
    /// Create a client over the given backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Geocode a free-text address
    ///
    /// The local unit number is stripped first. Addresses that normalize to
    /// a single character or less are not sent to the provider at all.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodeResult>> {
        let normalized = address::normalize(address);
        if normalized.chars().count() <= 1 {
            debug!("Address {:?} too short to geocode", normalized);
            return Ok(None);
        }

        debug!("Geocoding {:?}", normalized);
        match self.backend.search(&normalized).await? {
            Some(raw) => {
                let coordinate = location_of(&raw)?;
                Ok(Some(GeocodeResult { coordinate, raw }))
            }
            None => Ok(None),
        }
    }

    /// Reverse geocode a coordinate into a display address
    pub async fn reverse_geocode(&self, coordinate: Coordinates) -> Result<Option<String>> {
        self.backend.reverse(coordinate).await
    }
}

/// Extract `geometry.location.{lat,lng}` from a provider result
fn location_of(raw: &serde_json::Value) -> Result<Coordinates> {
    let location = &raw["geometry"]["location"];
    let lat = location["lat"].as_f64();
    let lng = location["lng"].as_f64();

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
        _ => Err(Error::DataUnavailable(
            "Geocoding result has no geometry.location".to_string(),
        )),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory backend returning a fixed answer and counting calls
    pub(crate) struct FakeGeoBackend {
        pub result: Option<serde_json::Value>,
        pub display: Option<String>,
        pub reverse_fails: bool,
        pub searches: AtomicUsize,
        pub last_query: std::sync::Mutex<Option<String>>,
    }

    impl FakeGeoBackend {
        pub fn found(lat: f64, lng: f64) -> Self {
            Self {
                result: Some(json!({
                    "formatted_address": "Marszałkowska 1, Warszawa, Polska",
                    "geometry": { "location": { "lat": lat, "lng": lng } }
                })),
                display: Some("Marszałkowska 1, 00-001 Warszawa, Polska".to_string()),
                reverse_fails: false,
                searches: AtomicUsize::new(0),
                last_query: std::sync::Mutex::new(None),
            }
        }

        pub fn empty() -> Self {
            Self {
                result: None,
                display: None,
                reverse_fails: false,
                searches: AtomicUsize::new(0),
                last_query: std::sync::Mutex::new(None),
            }
        }

        pub fn searches(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    impl GeoBackend for FakeGeoBackend {
        async fn search(&self, query: &str) -> Result<Option<serde_json::Value>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.to_string());
            Ok(self.result.clone())
        }

        async fn reverse(&self, _coordinate: Coordinates) -> Result<Option<String>> {
            if self.reverse_fails {
                return Err(Error::Provider("reverse lookup unavailable".to_string()));
            }
            Ok(self.display.clone())
        }
    }

    #[tokio::test]
    async fn test_geocode_normalizes_before_search() {
        let client = GeocodingClient::new(FakeGeoBackend::found(52.23, 21.01));

        let result = client.geocode("Marszałkowska 12a/34").await.unwrap().unwrap();

        assert_eq!(result.coordinate, Coordinates::new(52.23, 21.01));
        assert_eq!(
            client.backend().last_query.lock().unwrap().as_deref(),
            Some("Marszałkowska 12a")
        );
        assert_eq!(result.raw["formatted_address"], "Marszałkowska 1, Warszawa, Polska");
    }

    #[tokio::test]
    async fn test_geocode_short_address_skips_provider() {
        let client = GeocodingClient::new(FakeGeoBackend::found(52.23, 21.01));

        assert!(client.geocode("a").await.unwrap().is_none());
        assert!(client.geocode("").await.unwrap().is_none());
        assert_eq!(client.backend().searches(), 0);
    }

    #[tokio::test]
    async fn test_geocode_no_match() {
        let client = GeocodingClient::new(FakeGeoBackend::empty());

        assert!(client.geocode("Nowhere 1").await.unwrap().is_none());
        assert_eq!(client.backend().searches(), 1);
    }

    #[tokio::test]
    async fn test_geocode_missing_geometry() {
        let mut backend = FakeGeoBackend::empty();
        backend.result = Some(json!({ "formatted_address": "Somewhere" }));
        let client = GeocodingClient::new(backend);

        let err = client.geocode("Somewhere 1").await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_reverse_geocode() {
        let client = GeocodingClient::new(FakeGeoBackend::found(52.23, 21.01));

        let display = client
            .reverse_geocode(Coordinates::new(52.23, 21.01))
            .await
            .unwrap();
        assert_eq!(display.as_deref(), Some("Marszałkowska 1, 00-001 Warszawa, Polska"));
    }

    #[test]
    fn test_geocode_result_serialization() {
        let result = GeocodeResult {
            coordinate: Coordinates::new(52.2297, 21.0122),
            raw: json!({ "place_id": "abc" }),
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: GeocodeResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.coordinate.lat, 52.2297);
        assert_eq!(parsed.raw["place_id"], "abc");
    }
}
