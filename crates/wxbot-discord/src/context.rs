//! Shared state handed to every message and scheduler handler.

use std::sync::Arc;

use tracing::warn;

use wxbot_core::config::CommandsConfig;
use wxbot_core::journal::Journal;
use wxbot_core::state::LocationState;
use wxbot_weather::WeatherApi;

pub struct BotContext {
    /// The one mutable record in the bot; only the change-location command writes it.
    pub state: LocationState,
    pub api: Arc<dyn WeatherApi>,
    pub commands: CommandsConfig,
    pub journal: Journal,
}

impl BotContext {
    /// Journal the gateway login of `tag`. Write failures are logged only.
    pub async fn record_login(&self, tag: &str) {
        let line = format!("\u{2705} {tag} logged in.");
        if let Err(e) = self.journal.append(&line).await {
            warn!(error = %e, code = e.code(), path = %self.journal.path().display(), "journal append failed");
        }
    }
}
