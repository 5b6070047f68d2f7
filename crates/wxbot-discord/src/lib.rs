pub mod adapter;
pub mod commands;
pub mod context;
pub mod embed;
pub mod error;
pub mod handler;
pub mod proactive;
pub mod send;

#[cfg(test)]
mod testing;

pub use adapter::DiscordAdapter;
pub use context::BotContext;
pub use error::DiscordError;
pub use proactive::ReportSchedule;
