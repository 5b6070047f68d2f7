//! Scheduled weather reports: fired scheduler jobs become channel posts.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serenity::builder::CreateMessage;
use serenity::model::channel::Channel;
use serenity::model::id::ChannelId;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use wxbot_core::report::{format_report, WeatherReport};
use wxbot_scheduler::{Job, SchedulerEngine};
use wxbot_weather::fetch;

use crate::context::BotContext;
use crate::error::DiscordError;

/// Where scheduled reports go.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &WeatherReport) -> Result<(), DiscordError>;
}

/// Posts reports to a fixed Discord channel over REST.
pub struct ChannelSink {
    http: Arc<serenity::http::Http>,
    channel_id: ChannelId,
}

impl ChannelSink {
    pub fn new(http: Arc<serenity::http::Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ReportSink for ChannelSink {
    async fn deliver(&self, report: &WeatherReport) -> Result<(), DiscordError> {
        let msg = CreateMessage::new().embed(crate::embed::to_create_embed(report));
        self.channel_id.send_message(&self.http, msg).await?;
        Ok(())
    }
}

/// Fetch the destination channel once and check that it accepts text.
pub async fn verify_channel(
    http: &serenity::http::Http,
    channel_id: u64,
) -> Result<ChannelId, DiscordError> {
    let unavailable = |reason: String| DiscordError::ChannelUnavailable { channel_id, reason };

    if channel_id == 0 {
        return Err(unavailable("channel id must be non-zero".to_string()));
    }
    let id = ChannelId::new(channel_id);

    match http.get_channel(id).await {
        Ok(Channel::Guild(gc)) if gc.is_text_based() => Ok(id),
        Ok(Channel::Private(_)) => Ok(id),
        Ok(_) => Err(unavailable("not a text channel".to_string())),
        Err(e) => Err(unavailable(e.to_string())),
    }
}

/// Everything needed to start scheduled reporting once the channel checks out.
pub struct ReportSchedule {
    pub engine: SchedulerEngine,
    pub fired_rx: mpsc::Receiver<Job>,
    pub shutdown: watch::Receiver<bool>,
    /// Consecutive fetch failures before an error is logged.
    pub alert_after_misses: u32,
}

/// Result of one scheduled fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Delivered,
    /// Weather fetch failed; nothing was sent.
    Skipped,
    DeliveryFailed,
}

pub struct ScheduledReporter {
    ctx: Arc<BotContext>,
    sink: Arc<dyn ReportSink>,
    alert_after_misses: u32,
    misses: AtomicU32,
}

impl ScheduledReporter {
    pub fn new(ctx: Arc<BotContext>, sink: Arc<dyn ReportSink>, alert_after_misses: u32) -> Self {
        Self {
            ctx,
            sink,
            alert_after_misses,
            misses: AtomicU32::new(0),
        }
    }

    /// Fetch, format and deliver one report labelled `period`.
    ///
    /// A failed fetch is dropped silently apart from logging; nothing is
    /// retried and no fault leaves this function.
    pub async fn fire(&self, period: &str) -> FireOutcome {
        let location = self.ctx.state.current().await;

        let snapshot = match fetch::fetch_current(self.ctx.api.as_ref(), location.coords).await {
            Ok(s) => {
                self.misses.store(0, Ordering::Relaxed);
                s
            }
            Err(_) => {
                let misses = self.misses.fetch_add(1, Ordering::Relaxed) + 1;
                if self.alert_after_misses > 0 && misses % self.alert_after_misses == 0 {
                    error!(misses, period, "scheduled weather reports keep failing");
                } else {
                    warn!(misses, period, "scheduled report skipped");
                }
                return FireOutcome::Skipped;
            }
        };

        let report = format_report(&snapshot, &location.label, period, Utc::now());
        if let Err(e) = self.sink.deliver(&report).await {
            warn!(period, error = %e, "scheduled report delivery FAILED");
            return FireOutcome::DeliveryFailed;
        }

        info!(period, label = %location.label, "scheduled report delivered");
        let line = format!("\u{1f4e4} Sent the {period} weather report.");
        if let Err(e) = self.ctx.journal.append(&line).await {
            warn!(error = %e, code = e.code(), path = %self.ctx.journal.path().display(), "journal append failed");
        }
        FireOutcome::Delivered
    }

    /// Background task: one independent `fire` per fired job.
    ///
    /// Runs until the scheduler engine drops its sender.
    pub async fn run(self: Arc<Self>, mut rx: mpsc::Receiver<Job>) {
        while let Some(job) = rx.recv().await {
            let reporter = Arc::clone(&self);
            tokio::spawn(async move {
                reporter.fire(&job.name).await;
            });
        }
        info!("scheduled report task exiting (channel closed)");
    }
}
