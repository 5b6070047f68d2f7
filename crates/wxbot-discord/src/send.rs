use serenity::builder::CreateMessage;
use serenity::model::channel::Message;

use crate::commands::Reply;

/// Reply to `msg` in its channel, as plain text or a report embed.
pub async fn send_reply(
    http: &serenity::http::Http,
    msg: &Message,
    reply: &Reply,
) -> Result<(), serenity::Error> {
    match reply {
        Reply::Text(text) => {
            msg.reply(http, text).await?;
        }
        Reply::Report(report) => {
            let out = CreateMessage::new()
                .embed(crate::embed::to_create_embed(report))
                .reference_message(msg);
            msg.channel_id.send_message(http, out).await?;
        }
    }
    Ok(())
}
