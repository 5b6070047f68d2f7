//! Weather report → Discord embed.

use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::Timestamp;

use wxbot_core::report::WeatherReport;

/// Convert to a serenity `CreateEmbed` builder.
pub fn to_create_embed(report: &WeatherReport) -> CreateEmbed {
    let mut e = CreateEmbed::new()
        .title(&report.title)
        .colour(report.colour)
        .footer(CreateEmbedFooter::new(&report.footer));
    for field in &report.fields {
        e = e.field(&field.name, &field.value, field.inline);
    }
    match Timestamp::from_unix_timestamp(report.timestamp.timestamp()) {
        Ok(ts) => e.timestamp(ts),
        Err(_) => e,
    }
}
