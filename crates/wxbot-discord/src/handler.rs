use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use tracing::{info, warn};

use crate::context::BotContext;
use crate::{commands, send};

/// Serenity event handler wired to the weather commands.
pub struct DiscordHandler {
    pub ctx: Arc<BotContext>,
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let tag = ready.user.tag();
        info!(name = %tag, "Discord bot connected");

        self.ctx.record_login(&tag).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Bots never issue commands; this also drops our own replies.
        if msg.author.bot {
            return;
        }

        let Some(reply) = commands::route(&self.ctx, &msg.content).await else {
            return;
        };

        if let Err(e) = send::send_reply(&ctx.http, &msg, &reply).await {
            warn!(error = %e, channel = %msg.channel_id, "Discord reply failed");
        }
    }
}
