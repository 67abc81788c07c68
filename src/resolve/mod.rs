//! Air quality resolution
//!
//! The pipeline is: normalize → geocode → reverse geocode → station lookup →
//! pure computations. Each stage runs after the previous one completes; no
//! state is kept between resolutions.
//!
//! The computations (coordinate order correction, distance, label, zoom,
//! center and interpretation) are plain functions over already fetched data.

pub mod interpret;

use crate::coord::distance::ellipsoidal_distance;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeocodingClient};
use crate::station::{StationLookupClient, StationReading, StationSource};
use interpret::{interpret_aqi, AqiCategory, Locale, Severity};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Latitude difference above which station coordinates are taken to be
/// reported as [lng, lat]
const SWAP_THRESHOLD_DEGREES: f64 = 5.0;

/// Map zoom tuning constants
const ZOOM_EXPONENT: f64 = 0.245;
const ZOOM_DIVISOR: f64 = 2.0;

/// Values derived from a location and its nearest station reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Distance to the station in whole meters
    pub distance_meters: u64,
    /// Distance for display, e.g. "850m" or "2.5km"
    pub distance_label: String,
    /// Zoom level that fits both points on a map
    pub map_zoom: u8,
    /// Point between location and station
    pub map_center: Coordinates,
    pub category: AqiCategory,
    /// Localized category label
    pub label: String,
    /// Localized health implications
    pub interpretation: String,
    pub severity: Severity,
}

/// Complete answer for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    /// Address as entered, for address lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Canonical address of the location, from reverse geocoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_address: Option<String>,
    /// Location the reading was requested for
    pub location: Coordinates,
    /// Reading of the nearest station, with corrected coordinates
    pub station: StationReading,
    pub result: ResolutionResult,
}

/// Swap station lat/lng when they look reversed
///
/// The provider sometimes sends `geo` as [lng, lat]. If the station latitude
/// is more than 5 degrees away from the reference latitude the components
/// are exchanged. This is a heuristic: it can misfire for genuinely distant
/// stations.
pub fn correct_station_coordinate_order(
    station: Coordinates,
    reference: Coordinates,
) -> Coordinates {
    if (station.lat - reference.lat).abs() > SWAP_THRESHOLD_DEGREES {
        station.swapped()
    } else {
        station
    }
}

/// Surface distance in whole meters (truncated)
pub fn compute_distance(a: Coordinates, b: Coordinates) -> u64 {
    ellipsoidal_distance(a, b) as u64
}

/// Human-readable distance
///
/// Above 1000 m: kilometers rounded to two decimals, always with at least
/// one fractional digit. Otherwise whole meters.
pub fn format_distance_label(meters: u64) -> String {
    if meters > 1000 {
        let km = (meters as f64 / 1000.0 * 100.0).round() / 100.0;
        if km.fract() == 0.0 {
            format!("{:.1}km", km)
        } else {
            format!("{}km", km)
        }
    } else {
        format!("{}m", meters)
    }
}

/// Map zoom level for a given location-to-station distance
pub fn compute_map_zoom(meters: u64) -> u8 {
    match meters {
        0..=499 => 15,
        500..=999 => 14,
        1000..=999_999 => {
            let step = ((meters as f64).powf(ZOOM_EXPONENT) / ZOOM_DIVISOR).floor();
            (15.0 - step) as u8
        }
        _ => 0,
    }
}

/// Map center between location and station
pub fn compute_map_center(a: Coordinates, b: Coordinates) -> Coordinates {
    a.midpoint(&b)
}

/// Derive the result for a location and its station reading
///
/// Returns the reading with corrected station coordinates alongside the
/// derived values.
pub fn build_result(
    location: Coordinates,
    station: StationReading,
    locale: Locale,
) -> (StationReading, ResolutionResult) {
    let coordinate = correct_station_coordinate_order(station.coordinate, location);
    if coordinate != station.coordinate {
        debug!(
            "Swapped station coordinates of {:?} to {}",
            station.station_name, coordinate
        );
    }
    let station = StationReading {
        coordinate,
        ..station
    };

    let distance_meters = compute_distance(location, coordinate);
    let interpretation = interpret_aqi(station.aqi, locale);

    let result = ResolutionResult {
        distance_meters,
        distance_label: format_distance_label(distance_meters),
        map_zoom: compute_map_zoom(distance_meters),
        map_center: compute_map_center(location, coordinate),
        category: interpretation.category,
        label: interpretation.label,
        interpretation: interpretation.text,
        severity: interpretation.severity,
    };

    (station, result)
}

/// Resolves addresses and coordinates to air quality reports
pub struct AirQualityResolver<G, S> {
    geocoder: GeocodingClient<G>,
    stations: StationLookupClient<S>,
    locale: Locale,
}

impl<G: GeoBackend, S: StationSource> AirQualityResolver<G, S> {
    /// Create a resolver from a geocoding backend and a station source
    pub fn new(geo_backend: G, station_source: S, locale: Locale) -> Self {
        Self {
            geocoder: GeocodingClient::new(geo_backend),
            stations: StationLookupClient::new(station_source),
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn geocoder(&self) -> &GeocodingClient<G> {
        &self.geocoder
    }

    pub fn stations(&self) -> &StationLookupClient<S> {
        &self.stations
    }

    /// Resolve a free-text address
    ///
    /// Returns `Ok(None)` if the address could not be geocoded; the station
    /// provider is not contacted in that case. A failed reverse lookup only
    /// leaves `display_address` empty.
    pub async fn resolve_address(&self, address: &str) -> Result<Option<AirQualityReport>> {
        let address = address.trim();
        if address.chars().count() < 2 {
            return Err(Error::InvalidInput(format!(
                "Address too short: {:?}",
                address
            )));
        }

        let Some(geocoded) = self.geocoder.geocode(address).await? else {
            info!("No geocoding result for {:?}", address);
            return Ok(None);
        };
        let location = geocoded.coordinate;

        let display_address = match self.geocoder.reverse_geocode(location).await {
            Ok(display) => display,
            Err(e) => {
                warn!("Reverse geocoding failed for {}: {}", location, e);
                None
            }
        };
        let station = self.stations.fetch_nearest_station(location).await?;
        let (station, result) = build_result(location, station, self.locale);

        info!(
            "Resolved {:?} to station {:?}, AQI {} ({})",
            address, station.station_name, station.aqi, result.distance_label
        );

        Ok(Some(AirQualityReport {
            query: Some(address.to_string()),
            display_address,
            location,
            station,
            result,
        }))
    }

    /// Resolve a coordinate pair
    pub async fn resolve_coordinates(&self, location: Coordinates) -> Result<AirQualityReport> {
        location.validate()?;

        let station = self.stations.fetch_nearest_station(location).await?;
        let (station, result) = build_result(location, station, self.locale);

        info!(
            "Resolved {} to station {:?}, AQI {} ({})",
            location, station.station_name, station.aqi, result.distance_label
        );

        Ok(AirQualityReport {
            query: None,
            display_address: None,
            location,
            station,
            result,
        })
    }
}
