//! Fakes shared by the unit tests in this crate.

use async_trait::async_trait;
use std::sync::Arc;

use wxbot_core::config::CommandsConfig;
use wxbot_core::journal::Journal;
use wxbot_core::state::{CurrentLocation, LocationState};
use wxbot_core::types::{Coordinates, WeatherSnapshot};
use wxbot_weather::{GeoCandidate, ProviderError, WeatherApi};

use crate::context::BotContext;

/// Scriptable provider: canned geocode candidates and an optional snapshot.
pub struct FakeApi {
    pub candidates: Vec<GeoCandidate>,
    pub snapshot: Option<WeatherSnapshot>,
}

impl FakeApi {
    pub fn new(candidates: Vec<GeoCandidate>, snapshot: Option<WeatherSnapshot>) -> Self {
        Self {
            candidates,
            snapshot,
        }
    }
}

#[async_trait]
impl WeatherApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }
    async fn geocode(&self, _query: &str, _limit: u8) -> Result<Vec<GeoCandidate>, ProviderError> {
        Ok(self.candidates.clone())
    }
    async fn current(&self, _coords: Coordinates) -> Result<WeatherSnapshot, ProviderError> {
        self.snapshot.clone().ok_or_else(|| ProviderError::Api {
            status: 500,
            message: "boom".to_string(),
        })
    }
}

pub fn clear_sky() -> WeatherSnapshot {
    WeatherSnapshot {
        condition: "clear sky".to_string(),
        temperature_celsius: 21.5,
        wind_speed_mps: 3.2,
        has_recent_rain: false,
    }
}

pub fn context(api: FakeApi, journal: Journal) -> BotContext {
    BotContext {
        state: LocationState::new(CurrentLocation {
            label: "Yukuhashi,Fukuoka,JP".to_string(),
            coords: Coordinates {
                lat: 33.7287,
                lon: 130.983,
            },
        }),
        api: Arc::new(api),
        commands: CommandsConfig::default(),
        journal,
    }
}
