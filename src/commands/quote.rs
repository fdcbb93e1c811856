use anyhow::{anyhow, bail, Result};
use poise::{
    serenity_prelude::{CreateAttachment, Message},
    CreateReply,
};
use tracing::warn;

use crate::error::UserError;
use crate::media;
use crate::quote_api::QuoteRequest;
use crate::shared::Context;

/// Generate a fake quote image (as GIF) from a message
#[poise::command(context_menu_command = "Quote", check = "crate::access::access_check")]
pub async fn quote(ctx: Context<'_>, message: Message) -> Result<()> {
    if message.content.is_empty() {
        bail!(UserError(anyhow!("The selected message must contain text")));
    }

    // image generation regularly takes longer than the 3s interaction deadline
    ctx.defer().await?;

    let author = &message.author;
    let request = QuoteRequest {
        username: author.name.clone(),
        display_name: author
            .global_name
            .clone()
            .unwrap_or_else(|| author.name.clone()),
        text: message.content.clone(),
        avatar: author.face(),
        color: true,
    };

    let png_url = ctx.data().api.generate_quote(&request).await?;
    let png_bytes = ctx.data().api.download_image(&png_url).await?;

    match media::to_gif(&png_bytes) {
        Ok(gif) => {
            ctx.send(
                CreateReply::default().attachment(CreateAttachment::bytes(gif, "quote.gif")),
            )
            .await?;
        }
        Err(err) => {
            // the PNG itself is still useful, so fall back to linking it
            warn!("Failed to convert quote PNG to GIF, sending the link instead: {err:#}");
            ctx.say(png_url).await?;
        }
    }

    Ok(())
}
