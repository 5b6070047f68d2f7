use std::sync::Arc;
use std::time::Duration;

use serenity::model::gateway::GatewayIntents;
use serenity::Client;
use tracing::{error, info, warn};

use wxbot_core::config::DiscordConfig;

use crate::context::BotContext;
use crate::handler::DiscordHandler;
use crate::proactive::{verify_channel, ChannelSink, ReportSchedule, ScheduledReporter};

/// Discord channel adapter.
///
/// Wraps a serenity `Client` and drives the event loop until the process exits.
/// Reconnects automatically whenever the gateway drops.
pub struct DiscordAdapter {
    ctx: Arc<BotContext>,
    config: DiscordConfig,
}

impl DiscordAdapter {
    pub fn new(config: &DiscordConfig, ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Connect to Discord and keep reconnecting whenever the gateway drops.
    ///
    /// Never returns; runs for the lifetime of the process.
    ///
    /// If `schedule` is `Some`, the destination channel is checked once and,
    /// if usable, the scheduler engine and report task are spawned. Both use
    /// `Arc<Http>` (Discord REST, not the gateway WebSocket), so they keep
    /// working across reconnects without being restarted.
    pub async fn run(self, schedule: Option<ReportSchedule>) {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        // Build first client, retrying indefinitely until initial connection succeeds.
        let first_client = loop {
            match self.build_client(intents).await {
                Ok(c) => break c,
                Err(e) => {
                    error!("Discord: initial connect failed ({e}), retrying in 30s");
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            }
        };

        if let Some(schedule) = schedule {
            self.install_reports(Arc::clone(&first_client.http), schedule)
                .await;
        }

        let mut client = first_client;

        loop {
            info!("Discord: gateway connecting");

            if let Err(e) = client.start().await {
                warn!("Discord: gateway error ({e}), reconnecting in 5s");
            } else {
                info!("Discord: gateway stopped cleanly, reconnecting in 5s");
            }

            tokio::time::sleep(Duration::from_secs(5)).await;

            // Rebuild the client for the next attempt.
            client = loop {
                match self.build_client(intents).await {
                    Ok(c) => break c,
                    Err(e) => {
                        error!("Discord: reconnect failed ({e}), retrying in 30s");
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            };
        }
    }

    /// Start the scheduler and report delivery, or log why they stay off.
    async fn install_reports(&self, http: Arc<serenity::http::Http>, schedule: ReportSchedule) {
        let Some(channel_id) = self.config.channel_id else {
            error!("Discord: no channel_id configured, scheduled reports disabled");
            return;
        };

        let channel = match verify_channel(&http, channel_id).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Discord: scheduled reports disabled");
                return;
            }
        };

        let sink = Arc::new(ChannelSink::new(http, channel));
        let reporter = Arc::new(ScheduledReporter::new(
            Arc::clone(&self.ctx),
            sink,
            schedule.alert_after_misses,
        ));

        tokio::spawn(reporter.run(schedule.fired_rx));
        tokio::spawn(schedule.engine.run(schedule.shutdown));
        info!(channel = %channel, "Discord: scheduled reports installed");
    }

    /// Build a fresh serenity `Client` with our event handler.
    async fn build_client(&self, intents: GatewayIntents) -> Result<Client, serenity::Error> {
        let handler = DiscordHandler {
            ctx: Arc::clone(&self.ctx),
        };

        Client::builder(&self.config.bot_token, intents)
            .event_handler(handler)
            .await
    }
}
