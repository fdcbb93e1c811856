use anyhow::{anyhow, bail, Result};
use poise::{
    serenity_prelude::{Attachment, CreateAttachment},
    CreateReply,
};

use crate::error::UserError;
use crate::media;
use crate::shared::Context;

// an explicitly provided link wins over the uploaded attachment
fn source_url(attachment_url: Option<String>, link: Option<String>) -> Option<String> {
    link.or(attachment_url)
}

/// Convert an image (PNG/JPG) into a GIF file
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn gif(
    ctx: Context<'_>,
    #[description = "Upload an image"] image: Option<Attachment>,
    #[description = "Or provide an image link"] url: Option<String>,
) -> Result<()> {
    let Some(source) = source_url(image.map(|attachment| attachment.url), url) else {
        bail!(UserError(anyhow!(
            "You must upload an image or provide a link"
        )));
    };

    ctx.defer().await?;

    let bytes = ctx.data().api.download_image(&source).await?;
    let gif = media::to_gif(&bytes)?;

    ctx.send(CreateReply::default().attachment(CreateAttachment::bytes(gif, "converted.gif")))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_wins_over_attachment() {
        assert_eq!(
            source_url(
                Some("https://cdn.example.com/upload.png".into()),
                Some("https://example.com/linked.png".into()),
            )
            .as_deref(),
            Some("https://example.com/linked.png")
        );
    }

    #[test]
    fn attachment_used_without_link() {
        assert_eq!(
            source_url(Some("https://cdn.example.com/upload.png".into()), None).as_deref(),
            Some("https://cdn.example.com/upload.png")
        );
    }

    #[test]
    fn neither_source_is_rejected() {
        assert_eq!(source_url(None, None), None);
    }
}
