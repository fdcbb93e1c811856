use std::time::Instant;

use anyhow::Result;
use poise::{serenity_prelude::UserId, CreateReply};
use tracing::{error, warn};

use crate::config::{ADMINS, COOLDOWN_WINDOW};
use crate::shared::Context;

pub mod cooldown;

pub fn is_admin(user: UserId) -> bool {
    ADMINS.contains(&user)
}

/// Whether the user may use the gated commands: admins always, everyone else
/// only with a persisted grant.
pub async fn has_access(ctx: Context<'_>, user: UserId) -> Result<bool> {
    if is_admin(user) {
        return Ok(true);
    }

    ctx.data().store.find_grant(user).await
}

/// Per-command check for gated commands. A store failure is logged and treated
/// as deny; an outage must never grant access.
pub async fn access_check(ctx: Context<'_>) -> Result<bool> {
    let user = ctx.author().id;

    let allowed = match has_access(ctx, user).await {
        Ok(allowed) => allowed,
        Err(err) => {
            error!("Access lookup failed, denying {user}: {err:#}");
            false
        }
    };

    if !allowed {
        warn!("Denied {} access to {:?}", user, ctx.invocation_string());
        ctx.send(
            CreateReply::default()
                .content("> You dont have access gng .. ask the owner.")
                .ephemeral(true),
        )
        .await?;
    }

    Ok(allowed)
}

/// Per-command check for admin-only commands.
pub async fn admin_check(ctx: Context<'_>) -> Result<bool> {
    let user = ctx.author().id;

    if is_admin(user) {
        return Ok(true);
    }

    warn!(
        "Non-admin {} attempted to invoke {:?}",
        user,
        ctx.invocation_string()
    );
    ctx.send(
        CreateReply::default()
            .content("> You arent a admin .. <:smh:1423529032707739688>")
            .ephemeral(true),
    )
    .await?;

    Ok(false)
}

/// Global pre-command check: one shared cooldown window per user across all
/// commands, so a single caller cannot spam the bot by rotating commands.
pub async fn cooldown_check(ctx: Context<'_>) -> Result<bool> {
    let user = ctx.author().id;

    if ctx.data().cooldowns.allow(user, Instant::now()) {
        return Ok(true);
    }

    warn!("Throttled {} on {:?}", user, ctx.invocation_string());
    ctx.send(
        CreateReply::default()
            .content(format!(
                "> You're using commands too fast — wait {} seconds.",
                COOLDOWN_WINDOW.as_secs()
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(false)
}

/// Assembles the display roster: admins first, then granted users, with
/// grants that shadow an admin dropped.
pub fn full_roster(admins: &[UserId], grants: &[UserId]) -> Vec<UserId> {
    let mut roster: Vec<UserId> = admins.to_vec();

    for &grant in grants {
        if !admins.contains(&grant) {
            roster.push(grant);
        }
    }

    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_admins_first() {
        let admins = [UserId::new(1)];
        let grants = [UserId::new(2), UserId::new(3)];

        assert_eq!(
            full_roster(&admins, &grants),
            vec![UserId::new(1), UserId::new(2), UserId::new(3)]
        );
    }

    #[test]
    fn roster_drops_duplicate_admin_grant() {
        let admins = [UserId::new(1), UserId::new(2)];
        let grants = [UserId::new(2), UserId::new(3)];

        assert_eq!(
            full_roster(&admins, &grants),
            vec![UserId::new(1), UserId::new(2), UserId::new(3)]
        );
    }

    #[test]
    fn roster_empty_grants() {
        let admins = [UserId::new(1)];

        assert_eq!(full_roster(&admins, &[]), vec![UserId::new(1)]);
    }
}
