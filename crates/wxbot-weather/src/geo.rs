//! Free-text place lookup with provider-ordered disambiguation.

use tracing::{info, warn};

use wxbot_core::types::{Coordinates, GeocodeResult, Location};

use crate::provider::{GeoCandidate, WeatherApi};

/// Candidate cap sent with every lookup.
pub const GEOCODE_LIMIT: u8 = 5;

pub const NO_MATCH_MESSAGE: &str =
    "No matching place found. Try the form `City,State,Country`, e.g. `Shinagawa,Tokyo,JP`.";

pub const LOOKUP_FAILED_MESSAGE: &str = "The place lookup failed. Please try again later.";

/// Render a candidate as `"name, country"` or `"name, state, country"`.
pub fn candidate_label(candidate: &GeoCandidate) -> String {
    match candidate.state.as_deref() {
        Some(state) if !state.is_empty() => {
            format!("{}, {}, {}", candidate.name, state, candidate.country)
        }
        _ => format!("{}, {}", candidate.name, candidate.country),
    }
}

/// Resolve `query` to a single place, a disambiguation list, or an error message.
///
/// Never retries; provider faults are logged and reported as
/// [`LOOKUP_FAILED_MESSAGE`].
pub async fn resolve(api: &dyn WeatherApi, query: &str) -> GeocodeResult {
    let query = query.trim();
    if query.is_empty() {
        return GeocodeResult::Error(NO_MATCH_MESSAGE.to_string());
    }

    let candidates = match api.geocode(query, GEOCODE_LIMIT).await {
        Ok(c) => c,
        Err(e) => {
            warn!(provider = api.name(), query, error = %e, "geocoding lookup failed");
            return GeocodeResult::Error(LOOKUP_FAILED_MESSAGE.to_string());
        }
    };

    match candidates.as_slice() {
        [] => {
            info!(query, "geocoding returned no candidates");
            GeocodeResult::Error(NO_MATCH_MESSAGE.to_string())
        }
        [only] => match Coordinates::new(only.lat, only.lon) {
            Ok(coords) => GeocodeResult::Resolved(Location {
                name: only.name.clone(),
                country: only.country.clone(),
                region: only.state.clone(),
                coords,
            }),
            Err(e) => {
                warn!(provider = api.name(), query, error = %e, "geocoding returned out-of-range coordinates");
                GeocodeResult::Error(LOOKUP_FAILED_MESSAGE.to_string())
            }
        },
        many => GeocodeResult::Ambiguous(many.iter().map(candidate_label).collect()),
    }
}
