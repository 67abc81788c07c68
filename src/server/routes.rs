//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::GeoBackend;
use crate::resolve::interpret::AqiCategory;
use crate::resolve::AirQualityReport;
use crate::server::state::AppState;
use crate::station::StationSource;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router<G, S>(state: Arc<AppState<G, S>>) -> Router
where
    G: GeoBackend + 'static,
    S: StationSource + 'static,
{
    Router::new()
        .route("/api/address", get(address_handler::<G, S>))
        .route("/api/coords", get(coords_handler::<G, S>))
        .route("/api/categories", get(categories_handler::<G, S>))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::DataUnavailable(_) => (StatusCode::NOT_FOUND, "DATA_UNAVAILABLE"),
            Error::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status: Some(status.as_u16()),
        }
    }
}

/// Address lookup query
#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    #[serde(default)]
    pub address: String,
}

/// Air quality for an address
///
/// GET /api/address?address=...
async fn address_handler<G: GeoBackend, S: StationSource>(
    State(state): State<Arc<AppState<G, S>>>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<AirQualityReport>, ApiError> {
    state
        .resolver
        .resolve_address(&query.address)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::from(Error::NotFound(query.address.trim().to_string())))
}

/// Coordinate lookup query
///
/// Kept as text so malformed values produce our own error body.
#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Air quality for a coordinate pair
///
/// GET /api/coords?lat=...&lng=...
async fn coords_handler<G: GeoBackend, S: StationSource>(
    State(state): State<Arc<AppState<G, S>>>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<AirQualityReport>, ApiError> {
    let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
        return Err(Error::InvalidInput("Both lat and lng are required".to_string()).into());
    };

    let location = Coordinates::parse(&lat, &lng)?;
    let report = state.resolver.resolve_coordinates(location).await?;
    Ok(Json(report))
}

/// One row of the interpretation table
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: AqiCategory,
    pub min_aqi: i32,
    pub max_aqi: Option<i32>,
    pub label: String,
    pub description: String,
    pub css_class: String,
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub locale: String,
    pub categories: Vec<CategoryInfo>,
}

/// Interpretation table in the server's locale
///
/// GET /api/categories
async fn categories_handler<G: GeoBackend, S: StationSource>(
    State(state): State<Arc<AppState<G, S>>>,
) -> Json<CategoriesResponse> {
    let locale = state.resolver.locale();
    let categories = AqiCategory::all()
        .into_iter()
        .map(|category| {
            let (min_aqi, max_aqi) = category.range();
            CategoryInfo {
                category,
                min_aqi,
                max_aqi,
                label: category.label(locale).to_string(),
                description: category.description(locale).to_string(),
                css_class: category.severity().css_class().to_string(),
            }
        })
        .collect();

    Json(CategoriesResponse {
        locale: locale.to_string(),
        categories,
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::tests::FakeGeoBackend;
    use crate::resolve::interpret::Locale;
    use crate::resolve::AirQualityResolver;
    use crate::station::tests::{sample_feed, FakeStationSource};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    type TestState = AppState<FakeGeoBackend, FakeStationSource>;

    fn create_test_state(geo: FakeGeoBackend, feed: serde_json::Value) -> Arc<TestState> {
        let resolver = AirQualityResolver::new(geo, FakeStationSource::new(feed), Locale::En);
        Arc::new(AppState::new(resolver))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        state: Arc<TestState>,
        uri: &str,
    ) -> (StatusCode, T) {
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, body): (_, StatusResponse) = get_json(state, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.running);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_address_endpoint() {
        let state = create_test_state(FakeGeoBackend::found(52.23, 21.01), sample_feed());

        let (status, report): (_, AirQualityReport) =
            get_json(state, "/api/address?address=Marsza%C5%82kowska%201%2F3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.query.as_deref(), Some("Marszałkowska 1/3"));
        assert_eq!(report.station.aqi, 57);
        assert_eq!(report.result.label, "Moderate");
    }

    #[tokio::test]
    async fn test_address_not_found() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, err): (_, ApiError) =
            get_json(state.clone(), "/api/address?address=Nowhere%201").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(state.resolver.stations().source().calls(), 0);
    }

    #[tokio::test]
    async fn test_address_too_short() {
        let state = create_test_state(FakeGeoBackend::found(52.23, 21.01), sample_feed());

        let (status, err): (_, ApiError) = get_json(state, "/api/address?address=a").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_address_missing_city() {
        let mut feed = sample_feed();
        feed["data"].as_object_mut().unwrap().remove("city");
        let state = create_test_state(FakeGeoBackend::found(52.23, 21.01), feed);

        let (status, err): (_, ApiError) =
            get_json(state, "/api/address?address=Marsza%C5%82kowska%201").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "DATA_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_coords_endpoint() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, report): (_, AirQualityReport) =
            get_json(state, "/api/coords?lat=52.23&lng=21.01").await;

        assert_eq!(status, StatusCode::OK);
        assert!(report.query.is_none());
        assert_eq!(report.location, Coordinates::new(52.23, 21.01));
        assert_eq!(report.station.pm10, Some(23.5));
    }

    #[tokio::test]
    async fn test_coords_missing_parameter() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, err): (_, ApiError) = get_json(state, "/api/coords?lat=52.23").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_coords_malformed() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, err): (_, ApiError) =
            get_json(state.clone(), "/api/coords?lat=north&lng=21.01").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_INPUT");
        assert_eq!(state.resolver.stations().source().calls(), 0);
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let state = create_test_state(FakeGeoBackend::empty(), sample_feed());

        let (status, body): (_, CategoriesResponse) = get_json(state, "/api/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.locale, "en");
        assert_eq!(body.categories.len(), 6);
        assert_eq!(body.categories[0].label, "Good");
        assert_eq!(body.categories[0].css_class, "list-group-item-success");
        assert_eq!(body.categories[5].min_aqi, 300);
        assert!(body.categories[5].max_aqi.is_none());
    }

    #[test]
    fn test_error_mapping() {
        let err = ApiError::from(Error::Provider("timeout".to_string()));
        assert_eq!(err.code, "PROVIDER_ERROR");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(Error::Config("bad".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
