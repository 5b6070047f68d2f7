//! OpenWeatherMap client: direct geocoding (`/geo/1.0/direct`) and current
//! weather (`/data/2.5/weather`).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use wxbot_core::config::WeatherConfig;
use wxbot_core::types::{Coordinates, WeatherSnapshot};

use crate::provider::{GeoCandidate, ProviderError, WeatherApi};

pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
            lang: config.lang.clone(),
        }
    }

    /// Send a GET and decode the JSON body, mapping non-2xx to `ProviderError::Api`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, path, "OpenWeatherMap API error");
            return Err(ProviderError::Api {
                status,
                message: text,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeoCandidate>, ProviderError> {
        debug!(query, limit, "geocoding lookup");
        self.get_json(
            "/geo/1.0/direct",
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, ProviderError> {
        debug!(lat = coords.lat, lon = coords.lon, "current weather request");
        let body: CurrentWeather = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", coords.lat.to_string()),
                    ("lon", coords.lon.to_string()),
                    ("units", self.units.clone()),
                    ("lang", self.lang.clone()),
                ],
            )
            .await?;
        snapshot_from(body)
    }
}

// ── response shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Main,
    wind: Wind,
    #[serde(default)]
    rain: Option<Rain>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

fn snapshot_from(body: CurrentWeather) -> Result<WeatherSnapshot, ProviderError> {
    let condition = body
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| ProviderError::Parse("empty weather condition list".to_string()))?;

    let has_recent_rain = body
        .rain
        .and_then(|r| r.one_hour)
        .is_some_and(|mm| mm > 0.0);

    Ok(WeatherSnapshot {
        condition,
        temperature_celsius: body.main.temp,
        wind_speed_mps: body.wind.speed,
        has_recent_rain,
    })
}
