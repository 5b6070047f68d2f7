//! `wxbot-weather`: geocoding and current-weather lookups.
//!
//! [`provider::WeatherApi`] is the seam between the bot and the HTTP
//! backend; [`openweather::OpenWeatherClient`] is the production
//! implementation. [`geo::resolve`] and [`fetch::fetch_current`] hold the
//! bot-facing logic on top of it.

pub mod fetch;
pub mod geo;
pub mod openweather;
pub mod provider;

pub use openweather::OpenWeatherClient;
pub use provider::{GeoCandidate, ProviderError, WeatherApi};
