//! Text commands: change the report location, show it, or report now.
//!
//! Classification is stateless and literal: prefixes and exact matches are
//! case- and whitespace-sensitive, exactly as configured. Routing is kept
//! free of serenity types so it can be driven without a gateway.

use chrono::Utc;
use tracing::info;

use wxbot_core::config::CommandsConfig;
use wxbot_core::report::{format_report, WeatherReport, PERIOD_CURRENT};
use wxbot_core::types::GeocodeResult;
use wxbot_weather::{fetch, geo};

use crate::context::BotContext;

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `Change/<query>`: geocode `query` and make it the report location.
    ChangeLocation(&'a str),
    /// `now city`: show the current location label.
    QueryLocation,
    /// `!天気`: report current conditions.
    ReportNow,
}

/// What to send back to the channel the command came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Report(WeatherReport),
}

/// Classify message text. Returns `None` for anything that is not a command.
pub fn parse<'a>(text: &'a str, commands: &CommandsConfig) -> Option<Command<'a>> {
    if let Some(rest) = text.strip_prefix(commands.change_location.as_str()) {
        // Only the first path segment is the query: `Change/Tokyo/extra` → `Tokyo`.
        let query = rest.split('/').next().unwrap_or(rest).trim();
        return Some(Command::ChangeLocation(query));
    }
    if text == commands.query_location {
        return Some(Command::QueryLocation);
    }
    if text == commands.report_now {
        return Some(Command::ReportNow);
    }
    None
}

/// Run the command in `text`, if any, and build the reply.
pub async fn route(ctx: &BotContext, text: &str) -> Option<Reply> {
    let command = parse(text, &ctx.commands)?;

    let reply = match command {
        Command::ChangeLocation(query) => change_location(ctx, query).await,
        Command::QueryLocation => {
            let current = ctx.state.current().await;
            Reply::Text(format!(
                "\u{1f30d} The current location is \u{201c}{}\u{201d}.",
                current.label
            ))
        }
        Command::ReportNow => report_now(ctx).await,
    };
    Some(reply)
}

async fn change_location(ctx: &BotContext, query: &str) -> Reply {
    match geo::resolve(ctx.api.as_ref(), query).await {
        GeocodeResult::Error(message) => Reply::Text(format!("\u{274c} {message}")),
        GeocodeResult::Ambiguous(candidates) => {
            let list = candidates
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {}", i + 1, c))
                .collect::<Vec<_>>()
                .join("\n");
            Reply::Text(format!(
                "\u{1f50d} Several places match your input.\nPlease be more specific.\n\n**Candidates:**\n{list}"
            ))
        }
        GeocodeResult::Resolved(location) => {
            let label = ctx.state.set(&location).await;
            Reply::Text(format!(
                "\u{2705} Weather location changed to \u{201c}{label}\u{201d}."
            ))
        }
    }
}

async fn report_now(ctx: &BotContext) -> Reply {
    // One snapshot for both the fetch and the title.
    let location = ctx.state.current().await;
    match fetch::fetch_current(ctx.api.as_ref(), location.coords).await {
        Ok(snapshot) => {
            info!(label = %location.label, "on-demand report");
            Reply::Report(format_report(
                &snapshot,
                &location.label,
                PERIOD_CURRENT,
                Utc::now(),
            ))
        }
        Err(_) => Reply::Text("Failed to fetch weather information.".to_string()),
    }
}
