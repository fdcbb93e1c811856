use anyhow::{anyhow, Error, Result};
use poise::{
    serenity_prelude::{Colour, CreateEmbed, Mentionable as _},
    CreateReply, FrameworkError,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::config::BOT_MAINTAINER;

/// Marker for errors caused by user input rather than a bot fault. These are
/// reported back without the "please report this" boilerplate.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct UserError(#[from] pub anyhow::Error);

pub fn deduplicate_error_chain(error: &mut Error) {
    let mut error_chain: Vec<String> = error.chain().map(|err| err.to_string()).collect();

    error_chain.dedup();

    let mut error_chain = error_chain.into_iter().rev();
    let mut new_error = anyhow!(error_chain.next().unwrap());

    for message in error_chain {
        new_error = new_error.context(message);
    }

    *error = new_error;
}

fn internal_error_embed(error: &Error) -> CreateEmbed {
    CreateEmbed::new()
        .title("Internal Error")
        .description(format!(
            "```\n{error:?}\n```\nPlease report this to {}!",
            BOT_MAINTAINER.mention()
        ))
        .colour(Colour::RED)
}

fn user_error_embed(error: &Error) -> CreateEmbed {
    CreateEmbed::new()
        .title("You seem to have made a mistake")
        .description(format!("```\n{error:?}\n```"))
        .colour(Colour::GOLD)
}

fn warning_embed(title: &str, description: String) -> CreateEmbed {
    CreateEmbed::new()
        .title(title.to_string())
        .description(description)
        .colour(Colour::GOLD)
}

async fn try_handle_error<U>(error: FrameworkError<'_, U, Error>) -> Result<()>
where
    U: Send + Sync + 'static,
{
    match error {
        FrameworkError::Command { mut error, ctx, .. } => {
            let invocation_string = ctx.invocation_string();
            let embed = if error.is::<UserError>() {
                deduplicate_error_chain(&mut error);
                error!("A user error occurred while executing {invocation_string:?}: {error:#}");
                user_error_embed(&error)
            } else {
                deduplicate_error_chain(&mut error);
                error!("An error occurred while executing {invocation_string:?}: {error:#}");
                internal_error_embed(&error)
            };

            ctx.send(CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        FrameworkError::CommandPanic { ctx, payload, .. } => {
            if let Some(payload) = payload {
                error!(
                    "[PANIC] Invocation `{}` caused a panic with payload: {}",
                    ctx.invocation_string(),
                    payload
                );
            } else {
                error!(
                    "[PANIC] Invocation `{}` caused a panic with unknown payload",
                    ctx.invocation_string()
                );
            }

            let embed = CreateEmbed::new()
                .title("Panicked")
                .description(format!(
                    "A critical error occurred and the command handler panicked!\n\
                    This should not affect the bot as a whole.\n\n\
                    Please report this to {}!",
                    BOT_MAINTAINER.mention()
                ))
                .colour(Colour::RED);

            ctx.send(CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
        FrameworkError::ArgumentParse {
            error, input, ctx, ..
        } => {
            let invocation_string = ctx.invocation_string();
            let description = match input {
                Some(input) => {
                    format!(
                        "Failed to parse {input:?} from `{invocation_string}` into an argument: {error}",
                    )
                }
                None => {
                    format!("Failed to parse an argument from `{invocation_string}`: {error}")
                }
            };

            warn!(description);

            ctx.send(
                CreateReply::default()
                    .embed(warning_embed("Failed to parse argument", description))
                    .ephemeral(true),
            )
            .await?;
        }
        FrameworkError::CommandStructureMismatch {
            description, ctx, ..
        } => {
            error!(
                "Mismatch between registered command and poise command for `/{}`: {description}",
                ctx.command.qualified_name,
            );

            let ctx = poise::Context::Application(ctx);
            ctx.send(
                CreateReply::default()
                    .embed(warning_embed(
                        "Command structure mismatch",
                        format!(
                            "```\n{description}\n```\nThe bot's registered commands are out of \
                            date; a restart should re-register them."
                        ),
                    ))
                    .ephemeral(true),
            )
            .await?;
        }
        FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!(
                "Bot is lacking permissions for {:?}: {missing_permissions}",
                ctx.invocation_string()
            );

            ctx.send(
                CreateReply::default()
                    .embed(warning_embed(
                        "Lacking Bot Permissions",
                        format!(
                            "The bot is missing the following permissions to execute this \
                            command: **{missing_permissions}**"
                        ),
                    ))
                    .ephemeral(true),
            )
            .await?;
        }
        FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let description = if let Some(permissions) = missing_permissions {
                warn!(
                    "User is lacking permissions for {:?}: {permissions}",
                    ctx.invocation_string(),
                );
                format!(
                    "You are missing the following permissions to execute this command: \
                    **{permissions}**"
                )
            } else {
                warn!(
                    "User is lacking permissions for {:?}",
                    ctx.invocation_string(),
                );
                "You do not have the permissions needed to execute this command".to_string()
            };

            ctx.send(
                CreateReply::default()
                    .embed(warning_embed("Lacking User Permissions", description))
                    .ephemeral(true),
            )
            .await?;
        }
        FrameworkError::CommandCheckFailed { error, ctx, .. } => match error {
            Some(mut error) => {
                deduplicate_error_chain(&mut error);
                error!("Check errored for {:?}: {error:#}", ctx.invocation_string());

                ctx.send(
                    CreateReply::default()
                        .embed(internal_error_embed(&error))
                        .ephemeral(true),
                )
                .await?;
            }
            None => {
                // The check itself already responded with a rejection message
                warn!("Check failed for {:?}", ctx.invocation_string());
            }
        },
        FrameworkError::UnknownInteraction { interaction, .. } => {
            warn!(
                "Received interaction for an unknown command: {:?}",
                interaction.data.name,
            );
        }
        other => poise::builtins::on_error(other)
            .await
            .map_err(|err| anyhow!("Builtin error handler failed: {err}"))?,
    }

    Ok(())
}

pub async fn error_handler<U>(error: FrameworkError<'_, U, Error>)
where
    U: Send + Sync + 'static,
{
    if let Err(mut err) = try_handle_error(error).await {
        deduplicate_error_chain(&mut err);
        error!("Failed to handle error: {err:#}");
    }
}
