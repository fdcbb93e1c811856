use anyhow::{Context as _, Result};
use poise::{serenity_prelude::EditProfile, CreateReply};
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::PM2_PROCESS;
use crate::shared::Context;

// restart gets its own denial text, separate from the usual admin-command one
async fn reload_gate(ctx: Context<'_>) -> Result<bool> {
    if crate::access::is_admin(ctx.author().id) {
        return Ok(true);
    }

    warn!("Non-admin {} attempted to reload the bot", ctx.author().id);
    ctx.send(
        CreateReply::default()
            .content("> You aren't authorized to reload the bot.")
            .ephemeral(true),
    )
    .await?;

    Ok(false)
}

/// Reload the bot (PM2 restart)
#[poise::command(slash_command, check = "reload_gate")]
pub async fn reload(ctx: Context<'_>) -> Result<()> {
    // confirm before restarting; there is no afterwards
    ctx.send(
        CreateReply::default()
            .content("> Bot reload has been triggered. Restarting via PM2 now...")
            .ephemeral(true),
    )
    .await?;

    info!("{} triggered a pm2 restart", ctx.author().id);

    Command::new("pm2")
        .args(["restart", PM2_PROCESS])
        .spawn()
        .context("Failed to spawn pm2")?;

    Ok(())
}

/// Change the username (OWNER ONLY)
#[poise::command(slash_command, check = "crate::access::admin_check")]
pub async fn setname(
    ctx: Context<'_>,
    #[description = "New username"] username: String,
) -> Result<()> {
    let mut current_user = ctx.serenity_context().cache.current_user().clone();

    current_user
        .edit(
            ctx.serenity_context(),
            EditProfile::new().username(&username),
        )
        .await
        .context("Failed to update the username")?;

    ctx.send(
        CreateReply::default()
            .content(format!("> Username updated to **{username}**"))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_stays_gated() {
        assert_eq!(reload().checks.len(), 1);
    }
}

