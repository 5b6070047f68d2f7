use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use wxbot_core::types::{Coordinates, WeatherSnapshot};

/// One candidate from a direct geocoding lookup, as the provider returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    pub country: String,
    /// State / prefecture; absent for many countries.
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Geocoding + current-conditions backend.
///
/// Implemented by the OpenWeatherMap client; tests substitute in-memory fakes.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Provider name used in log fields.
    fn name(&self) -> &str;

    /// Look up at most `limit` places matching free-text `query`, in provider order.
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeoCandidate>, ProviderError>;

    /// Current conditions at `coords`.
    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
