use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use wxbot_core::config::WxConfig;
use wxbot_core::journal::Journal;
use wxbot_core::state::LocationState;
use wxbot_discord::{BotContext, DiscordAdapter, ReportSchedule};
use wxbot_scheduler::{DailySchedule, SchedulerEngine};
use wxbot_weather::OpenWeatherClient;

/// Discord bot that posts weather reports on a daily schedule and on demand.
#[derive(Debug, Parser)]
#[command(name = "wxbot", version)]
struct Cli {
    /// Path to the TOML config file (default: $WXBOT_CONFIG, then ./wxbot.toml).
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wxbot=info,wxbot_discord=info,wxbot_weather=info,wxbot_scheduler=info,wxbot_core=info"
                    .into()
            }),
        )
        .init();

    // load config: --config > WXBOT_CONFIG env > ./wxbot.toml
    let cli = Cli::parse();
    let config_path = cli.config.or_else(|| std::env::var("WXBOT_CONFIG").ok());
    let config = match WxConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!(code = e.code(), "config load failed: {e}");
            return Err(e.into());
        }
    };

    let tz = config.timezone()?;
    let initial = config.default_location()?;
    info!(label = %initial.label, coords = %initial.coords, tz = %tz, "starting location");

    let ctx = Arc::new(BotContext {
        state: LocationState::new(initial),
        api: Arc::new(OpenWeatherClient::new(&config.weather)),
        commands: config.commands.clone(),
        journal: Journal::new(&config.journal.path, tz),
    });

    // Fired-job channel: SchedulerEngine → ScheduledReporter task
    let (fired_tx, fired_rx) = tokio::sync::mpsc::channel(16);
    let mut engine = SchedulerEngine::new(tz, fired_tx);
    for entry in &config.schedule.entries {
        let schedule: DailySchedule = match entry.time.parse() {
            Ok(s) => s,
            Err(e) => {
                warn!(label = %entry.label, "skipping schedule entry: {e}");
                continue;
            }
        };
        match engine.add_job(&entry.label, schedule) {
            Ok(job) => {
                if let Some(next) = job.next_run {
                    info!(label = %job.name, next_run = %next.with_timezone(&tz), "report scheduled");
                }
            }
            Err(e) => warn!(label = %entry.label, "skipping schedule entry: {e}"),
        }
    }

    // The adapter only starts the engine once the destination channel checks out.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let schedule = ReportSchedule {
        engine,
        fired_rx,
        shutdown: shutdown_rx,
        alert_after_misses: config.schedule.alert_after_misses,
    };

    let adapter = DiscordAdapter::new(&config.discord, Arc::clone(&ctx));
    let bot = tokio::spawn(adapter.run(Some(schedule)));
    info!("Discord bot started");

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    // signal scheduler to stop
    let _ = shutdown_tx.send(true);
    bot.abort();
    Ok(())
}
