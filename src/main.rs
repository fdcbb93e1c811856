use std::env;

use anyhow::{anyhow, Result};
use chrono::Utc;
use poise::{
    serenity_prelude::{ClientBuilder, GatewayIntents},
    Framework, FrameworkOptions,
};
use tokio::sync::mpsc;
use tracing::info;

use access::cooldown::CooldownTracker;
use db::StoreHandle;
use quote_api::ApiHandle;
use shared::BotData;

mod access;
mod commands;
mod config;
mod db;
mod error;
mod log;
mod media;
mod quote_api;
mod shared;

fn get_env_var(name: &str) -> Result<String> {
    env::var(name).map_err(|err| anyhow!("Failed to load environment variable '{name}': {err:#}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = log::init_log();

    _ = dotenvy::dotenv();

    let token = get_env_var("DISCORD_TOKEN")?;

    let (store_tx, store_rx) = mpsc::channel(32);
    match db::db_thread::start_db_thread(store_rx).await {
        Ok(Ok(())) => {
            info!("Database thread has completed initialisation");
            Ok(())
        }
        Ok(Err(err)) => Err(anyhow!("Failed to initialise database thread: {err:#}")),
        Err(_) => Err(anyhow!("Database thread panicked during initialisation")),
    }?;

    let commands = vec![
        commands::info::about(),
        commands::info::webview(),
        commands::info::brokenwebview(),
        commands::info::loading(),
        commands::info::cmd(),
        commands::info::rpc(),
        commands::info::safe(),
        commands::info::ticket(),
        commands::info::discordfix(),
        commands::info::authbot(),
        commands::info::prefix(),
        commands::info::legacy(),
        commands::info::nightyauth(),
        commands::access::addaccess(),
        commands::access::removeaccess(),
        commands::access::listaccess(),
        commands::quote::quote(),
        commands::gif::gif(),
        commands::maintenance::reload(),
        commands::maintenance::setname(),
    ];

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands,
            on_error: |error| Box::pin(error::error_handler(error)),
            // every invocation passes the shared cooldown before any
            // command-specific access check runs
            command_check: Some(|ctx| Box::pin(access::cooldown_check(ctx))),
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "[>] `{}` invoked by {}",
                        ctx.invocation_string(),
                        ctx.author().name,
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "[<] {}'s `{}` invocation completed successfully",
                        ctx.author().name,
                        ctx.invocation_string(),
                    );
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());

                Ok(BotData {
                    store: StoreHandle::new(store_tx),
                    api: ApiHandle::new(),
                    cooldowns: CooldownTracker::new(),
                    started_at: Utc::now(),
                })
            })
        })
        .build();

    let mut client = ClientBuilder::new(&token, GatewayIntents::non_privileged())
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
