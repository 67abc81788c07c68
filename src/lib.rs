//! smog-radar: air quality at an address
//!
//! Resolves a street address or a coordinate pair to the reading of the
//! nearest air-quality monitoring station and interprets it.
//!
//! ## Pipeline
//!
//! - Strip the local unit number from the address ("Foo 12/3" → "Foo 12")
//! - Geocode the address (Google Geocoding API)
//! - Fetch the nearest station's reading (aqicn.org)
//! - Compute distance, map zoom/center and the AQI category
//!
//! ## Quick Start
//!
//! ```rust
//! use smog_radar::coord::Coordinates;
//! use smog_radar::resolve::{build_result, interpret::Locale};
//! use smog_radar::station::StationReading;
//!
//! let location = Coordinates::new(52.2297, 21.0122);
//! let reading = StationReading {
//!     aqi: 42,
//!     pm25: Some(42.0),
//!     pm10: None,
//!     measured_at: "2024-01-15 13:00:00".to_string(),
//!     station_name: "Warszawa".to_string(),
//!     // reported as [lng, lat]; corrected by build_result
//!     coordinate: Coordinates::new(21.004, 52.225),
//! };
//!
//! let (station, result) = build_result(location, reading, Locale::En);
//! assert_eq!(station.coordinate, Coordinates::new(52.225, 21.004));
//! assert_eq!(result.label, "Good");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod resolve;
pub mod server;
pub mod station;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use resolve::interpret::{AqiCategory, Locale, Severity};
pub use resolve::{AirQualityReport, AirQualityResolver, ResolutionResult};
pub use station::StationReading;
