use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WxError};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting values outside the valid WGS84 range.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let coords = Self { lat, lon };
        if coords.is_valid() {
            Ok(coords)
        } else {
            Err(WxError::InvalidCoordinates { lat, lon })
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A place returned by a single-match geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// State / prefecture / region, when the provider reports one.
    pub region: Option<String>,
    pub coords: Coordinates,
}

impl Location {
    /// Label used in replies and report titles: `"{name}, {country}"`.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Point-in-time weather reading. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub condition: String,
    pub temperature_celsius: f64,
    pub wind_speed_mps: f64,
    /// Precipitation was reported for the last hour.
    pub has_recent_rain: bool,
}

/// Outcome of a free-text geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    /// User-facing explanation; nothing was resolved.
    Error(String),
    /// Several candidates, rendered `"name, [region, ]country"` in provider order.
    Ambiguous(Vec<String>),
    Resolved(Location),
}
