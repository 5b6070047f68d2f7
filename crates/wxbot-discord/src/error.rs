/// Errors produced by the Discord adapter.
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("serenity error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("channel {channel_id} unavailable: {reason}")]
    ChannelUnavailable { channel_id: u64, reason: String },
}
