//! Centralized constants for the smog-radar crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters, used by the haversine fallback
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// WGS-84 semi-major axis in meters
    pub const WGS84_A: f64 = 6_378_137.0;

    /// WGS-84 flattening
    pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

    /// WGS-84 semi-minor axis in meters
    pub const WGS84_B: f64 = (1.0 - WGS84_F) * WGS84_A;
}

/// External API endpoints
pub mod api {
    /// Google Geocoding API
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// World Air Quality Index project API (aqicn.org)
    pub const WAQI_URL: &str = "https://api.waqi.info";

    /// User agent sent to both providers
    pub const USER_AGENT: &str = concat!("smog-radar/", env!("CARGO_PKG_VERSION"));
}
