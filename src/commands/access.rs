use std::time::Duration;

use anyhow::Result;
use poise::{
    serenity_prelude::{
        ButtonStyle, ComponentInteractionCollector, CreateActionRow, CreateButton, CreateEmbed,
        CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
        Mentionable as _, User,
    },
    CreateReply,
};
use tracing::info;

use crate::access::{full_roster, is_admin};
use crate::config::{ACCESS_PAGE_SIZE, ADMINS, EMBED_COLOUR, MENU_TIMEOUT_SECS};
use crate::shared::{Context, PageChunk};

/// Grant someone access to the bot (OWNER ONLY)
#[poise::command(slash_command, check = "crate::access::admin_check")]
pub async fn addaccess(
    ctx: Context<'_>,
    #[description = "The user to grant access"] user: User,
) -> Result<()> {
    let newly_granted = ctx.data().store.insert_grant(user.id).await?;

    let content = if newly_granted {
        info!("{} granted access to {}", ctx.author().id, user.id);
        format!("> {} has been granted access.", user.mention())
    } else {
        format!("> {} already has access.", user.mention())
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Remove someone's access (OWNER ONLY)
#[poise::command(slash_command, check = "crate::access::admin_check")]
pub async fn removeaccess(
    ctx: Context<'_>,
    #[description = "The user to remove access from"] user: User,
) -> Result<()> {
    let existed = ctx.data().store.delete_grant(user.id).await?;

    let content = if existed {
        info!("{} revoked access from {}", ctx.author().id, user.id);
        format!("> {} access removed.", user.mention())
    } else {
        format!("> {} did not have access.", user.mention())
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// All users who have access (OWNER ONLY)
#[poise::command(slash_command, check = "crate::access::admin_check")]
pub async fn listaccess(ctx: Context<'_>) -> Result<()> {
    let grants = ctx.data().store.list_grants().await?;
    let roster = full_roster(&ADMINS, &grants);

    if roster.is_empty() {
        ctx.send(
            CreateReply::default()
                .content("> No one has access .. gg ig")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let entries: Vec<String> = roster
        .iter()
        .map(|&id| {
            if is_admin(id) {
                format!("> Admin: {}", id.mention())
            } else {
                format!("> {}", id.mention())
            }
        })
        .collect();

    // button IDs are namespaced by the interaction ID so concurrent roster
    // menus don't steal each other's presses
    let ctx_id = ctx.id();
    let prev_id = format!("{ctx_id}prev");
    let next_id = format!("{ctx_id}next");

    let buttons = CreateActionRow::Buttons(vec![
        CreateButton::new(&prev_id)
            .label("<-")
            .style(ButtonStyle::Secondary),
        CreateButton::new(&next_id)
            .label("->")
            .style(ButtonStyle::Secondary),
    ]);

    let mut page = 0;

    ctx.send(
        CreateReply::default()
            .embed(roster_embed(&entries, page))
            .components(vec![buttons])
            .ephemeral(true),
    )
    .await?;

    while let Some(press) = ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
        .timeout(Duration::from_secs(MENU_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == next_id {
            page += 1;
        } else if press.data.custom_id == prev_id {
            page = page.saturating_sub(1);
        } else {
            continue;
        }

        let embed = roster_embed(&entries, page);
        // keep the tracked page in sync with the clamped one
        page = PageChunk::new(entries.len(), page, ACCESS_PAGE_SIZE).page;

        press
            .create_response(
                ctx.serenity_context(),
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new().embed(embed),
                ),
            )
            .await?;
    }

    Ok(())
}

fn roster_embed(entries: &[String], page: usize) -> CreateEmbed {
    let chunk = PageChunk::new(entries.len(), page, ACCESS_PAGE_SIZE);

    CreateEmbed::new()
        .title("Users")
        .colour(EMBED_COLOUR)
        .description(entries[chunk.range.clone()].join("\n"))
        .footer(CreateEmbedFooter::new(format!(
            "Page {}/{}",
            chunk.page + 1,
            chunk.total_pages
        )))
}
