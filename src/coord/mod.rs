//! Geographic coordinates
//!
//! This module handles:
//! - The `Coordinates` value shared by every pipeline stage
//! - Parsing and validating user-supplied coordinate pairs
//! - Surface distance between two coordinates (see [`distance`])

pub mod distance;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a latitude/longitude pair given as text
    ///
    /// Both values must parse as floats and lie within valid ranges.
    pub fn parse(lat: &str, lng: &str) -> Result<Self> {
        let lat: f64 = lat.trim().parse().map_err(|_| {
            Error::InvalidInput(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.trim().parse().map_err(|_| {
            Error::InvalidInput(format!("Invalid longitude: {}", lng))
        })?;

        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidInput(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidInput(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// The same pair with latitude and longitude exchanged
    pub fn swapped(&self) -> Self {
        Self::new(self.lng, self.lat)
    }

    /// Arithmetic midpoint of both components
    ///
    /// Not a geodesic midpoint; close enough at station-lookup distances.
    pub fn midpoint(&self, other: &Coordinates) -> Self {
        Self::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_valid() {
        let coords = Coordinates::parse("52.2297", " 21.0122 ").unwrap();
        assert_relative_eq!(coords.lat, 52.2297);
        assert_relative_eq!(coords.lng, 21.0122);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            Coordinates::parse("abc", "21.0"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Coordinates::parse("52.0", ""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(Coordinates::parse("91.0", "0").is_err());
        assert!(Coordinates::parse("0", "-180.5").is_err());
        assert!(Coordinates::parse("-90", "180").is_ok());
    }

    #[test]
    fn test_swapped() {
        let coords = Coordinates::new(14.5, 52.0).swapped();
        assert_eq!(coords, Coordinates::new(52.0, 14.5));
    }

    #[test]
    fn test_midpoint() {
        let a = Coordinates::new(50.0, 19.0);
        let b = Coordinates::new(51.0, 20.5);
        let mid = a.midpoint(&b);
        assert_relative_eq!(mid.lat, 50.5);
        assert_relative_eq!(mid.lng, 19.75);
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(52.2297, 21.0122);
        assert_eq!(coords.to_string(), "52.229700, 21.012200");
    }
}
