//! Air-quality station lookup
//!
//! A [`StationSource`] fetches the raw "feed by geo" payload for a
//! coordinate; [`StationLookupClient`] turns it into a [`StationReading`].

pub mod waqi;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reading from the monitoring station nearest to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    /// Overall air quality index
    pub aqi: i32,
    /// PM2.5 sub-index, if the station reports it
    pub pm25: Option<f64>,
    /// PM10 sub-index, if the station reports it
    pub pm10: Option<f64>,
    /// Measurement time as reported by the provider
    pub measured_at: String,
    /// Station name
    pub station_name: String,
    /// Station position (see `resolve::correct_station_coordinate_order`)
    pub coordinate: Coordinates,
}

impl StationReading {
    /// Parse a feed payload
    ///
    /// `data.aqi` and `data.city` are required. The pollutant sub-indices
    /// are optional and stay `None` when missing.
    pub fn from_feed(payload: &serde_json::Value) -> Result<Self> {
        let data = &payload["data"];

        let aqi = parse_aqi(&data["aqi"]).ok_or_else(|| {
            Error::DataUnavailable("Station feed has no usable data.aqi".to_string())
        })?;

        let city = data
            .get("city")
            .filter(|city| city.is_object())
            .ok_or_else(|| Error::DataUnavailable("Station feed has no data.city".to_string()))?;

        let station_name = city["name"].as_str().unwrap_or_default().to_string();

        let coordinate = match city["geo"].as_array().map(Vec::as_slice) {
            Some([first, second, ..]) => match (first.as_f64(), second.as_f64()) {
                (Some(first), Some(second)) => Coordinates::new(first, second),
                _ => {
                    return Err(Error::DataUnavailable(
                        "Station coordinates are not numeric".to_string(),
                    ))
                }
            },
            _ => {
                return Err(Error::DataUnavailable(
                    "Station feed has no data.city.geo".to_string(),
                ))
            }
        };

        let measured_at = data["time"]["s"].as_str().unwrap_or_default().to_string();

        Ok(Self {
            aqi,
            pm25: data["iaqi"]["pm25"]["v"].as_f64(),
            pm10: data["iaqi"]["pm10"]["v"].as_f64(),
            measured_at,
            station_name,
            coordinate,
        })
    }
}

/// AQI is an integer, but stations without data report "-"
fn parse_aqi(value: &serde_json::Value) -> Option<i32> {
    if let Some(aqi) = value.as_i64() {
        return i32::try_from(aqi).ok();
    }
    if let Some(aqi) = value.as_f64() {
        return Some(aqi.round() as i32);
    }
    value.as_str().and_then(|s| s.trim().parse().ok())
}

/// Trait for air-quality feed sources
pub trait StationSource: Send + Sync {
    /// Fetch the raw feed payload for the station nearest to `coordinate`
    fn feed(
        &self,
        coordinate: Coordinates,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;
}

/// Station lookup client: one feed request, then parsing
#[derive(Debug, Clone)]
pub struct StationLookupClient<S> {
    source: S,
}

impl<S: StationSource> StationLookupClient<S> {
    /// Create a client over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Access the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and parse the reading of the nearest station
    pub async fn fetch_nearest_station(&self, coordinate: Coordinates) -> Result<StationReading> {
        let payload = self.source.feed(coordinate).await?;
        let reading = StationReading::from_feed(&payload)?;
        debug!(
            "Nearest station to {} is {:?} (AQI {})",
            coordinate, reading.station_name, reading.aqi
        );
        Ok(reading)
    }
}
