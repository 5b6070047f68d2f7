use tracing::{debug, warn};

use wxbot_core::types::{Coordinates, WeatherSnapshot};

use crate::provider::{ProviderError, WeatherApi};

/// Fetch current conditions at `coords`. One request, no retry, no cache.
///
/// Failures are logged here; callers decide whether to tell the user or
/// drop the run.
pub async fn fetch_current(
    api: &dyn WeatherApi,
    coords: Coordinates,
) -> Result<WeatherSnapshot, ProviderError> {
    match api.current(coords).await {
        Ok(snapshot) => {
            debug!(
                provider = api.name(),
                condition = %snapshot.condition,
                temp = snapshot.temperature_celsius,
                "weather fetched"
            );
            Ok(snapshot)
        }
        Err(e) => {
            warn!(provider = api.name(), coords = %coords, error = %e, "weather fetch failed");
            Err(e)
        }
    }
}
