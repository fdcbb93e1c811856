use anyhow::Result;
use chrono::Utc;
use poise::{
    serenity_prelude::{CreateEmbed, Mentionable as _, User},
    CreateReply,
};

use crate::config::{ALT_WEBVIEW_LINK, ALT_WEBVIEW_USER, EMBED_COLOUR, WEBVIEW_LINK};
use crate::shared::Context;

fn support_embed(title: &str, description: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new()
        .title(title.to_string())
        .description(description)
        .colour(EMBED_COLOUR)
}

/// Sends the embed publicly, with the optional ping rendered as message
/// content so the mention actually notifies.
async fn send_embed_with_ping(
    ctx: Context<'_>,
    embed: CreateEmbed,
    ping: Option<User>,
) -> Result<()> {
    let mut reply = CreateReply::default().embed(embed);

    if let Some(user) = ping {
        reply = reply.content(user.mention().to_string());
    }

    ctx.send(reply).await?;

    Ok(())
}

fn webview_link_for(ctx: &Context<'_>) -> &'static str {
    if ctx.author().id == ALT_WEBVIEW_USER {
        ALT_WEBVIEW_LINK
    } else {
        WEBVIEW_LINK
    }
}

/// Show information about the bot
#[poise::command(slash_command)]
pub async fn about(ctx: Context<'_>) -> Result<()> {
    let uptime_seconds = (Utc::now() - ctx.data().started_at).num_seconds().max(0);
    let (hours, remainder) = (uptime_seconds / 3600, uptime_seconds % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);

    let embed = CreateEmbed::new()
        .title("About")
        .colour(EMBED_COLOUR)
        .field(
            "Stats",
            format!("> Uptime: ``{hours}h {minutes}m {seconds}s``"),
            true,
        )
        .field(
            "Commands",
            "> `/about` — Show information about the bot\n\
            > `/nightyauth` — Power nighty auth\n\
            > `/webview` — Fix weird looking UI issues\n\
            > `/brokenwebview` — Fix for broken WebView\n\
            > `/loading` — Fix infinite loading problems\n\
            > `/cmd` — Fix CMD prompt issues\n\
            > `/safe` — Nighty safety information\n\
            > `/ticket` — How to create a support ticket\n\
            > `/discordfix` — Fix Discord links opening in Canary\n\
            > `/authbot` — Get the bot authorization link\n\
            > `/prefix` — Understanding <p>\n\
            > `/legacy` — Legacy commands\n\
            > `/gif` — Convert an image (PNG/JPG) into a GIF file\n\
            > **Context Menu → `Quote`** — Generate a fake quote image (as GIF) from a message",
            true,
        )
        .field(
            "Owners",
            crate::config::ADMINS
                .iter()
                .map(|admin| format!("> {}", admin.mention()))
                .collect::<Vec<_>>()
                .join("\n"),
            false,
        );

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Fix for weird looking UI issues
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn webview(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Weird looking UI Fix",
        format!(
            "> 1. Fully close Nighty\n\
            > 2. Download WebView2: {}\n\
            > 3. Restart Nighty",
            webview_link_for(&ctx)
        ),
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Fix for broken WebView
#[poise::command(slash_command)]
pub async fn brokenwebview(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "WebView2 Fix Instructions",
        format!(
            "> 1. Open PowerShell as Administrator\n\
            > 2. Navigate to the installer folder:\n\
            > ```cd 'C:\\Program Files (x86)\\Microsoft\\EdgeWebView\\Application\\1*\\Installer'```\n\
            > If that fails, run this instead:\n\
            > ```cd 'C:\\Program Files\\Microsoft\\EdgeWebView\\Application\\1*\\Installer'```\n\
            > 3. Uninstall WebView2:\n\
            > ```setup.exe --uninstall --msedgewebview --system-level --verbose-logging --force-uninstall```\n\
            > 4. Reboot your PC\n\
            > 5. Reinstall WebView2 → Download from: {}\n\
            > Or direct installer link → [Microsoft Edge WebView2 Runtime](https://msedge.sf.dl.delivery.mp.microsoft.com/filestreamingservice/files/dad8096c-1b0c-40c5-9b1c-415164028ec9/MicrosoftEdgeWebView2RuntimeInstallerX64.exe)",
            webview_link_for(&ctx)
        ),
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Solution for infinite loading problems
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn loading(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Nighty Infinite Loading Fix",
        "> 1. Download a VPN (ProtonVPN is free)\n\
        > 2. Close Nighty or end `nighty.exe` task\n\
        > 3. Open the VPN & wait for it to connect\n\
        > 4. Run Nighty as **admin**\n\
        > 5. Once Nighty loads, you can disconnect VPN",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Fix for CMD prompt issues
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn cmd(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Nighty CMD Prompt Fix",
        "> 1. Press `WIN + R`\n\
        > 2. Type `%appdata%`\n\
        > 3. Find `Nighty Selfbot`\n\
        > 4. Delete `nighty.config`\n\
        > 5. Restart Nighty as Admin",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Fix for Rich Presence not showing
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn rpc(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Rich Presence Troubleshooting",
        "> 1. Set your Discord status to: ``Online``, ``Do Not Disturb``, or ``Idle``\n\
        > 2. If using custom images → Upload to [`Imgur`](https://imgur.com/) → Copy ``Direct Image URL``\n\
        > Enable Activity Privacy:\n\
        > 3. ``User Settings`` → ``Activity Privacy`` → ``Enable all options``\n\
        > Enable Server Activity Privacy:\n\
        > 4. ``Click server name`` → ``Privacy Settings`` → ``Enable both options``",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Nighty safety information
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn safe(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Is Nighty Safe?",
        "> Yes, Nighty is safe to use.\n\n\
        > We test thoroughly to ensure it is **undetectable**.\n\
        > Reminder: Discord **prohibits selfbots** in ToS.\n\
        > Ban reports in last 3 years: **0**\n\n\
        So technically against ToS, but in practice no bans happened.",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Instructions for creating a support ticket
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn ticket(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "How to Make a Ticket",
        "> Type `//newticket` in any channel you can type in.\n\
        > Or use this link: https://nighty.support",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Fix for Discord links opening in Canary
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn discordfix(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Discord Canary Link Fix",
        "> 1. Download this bat file: https://discordfix.niggy.one\n\
        > 2. Run the file\n\
        > 3. Restart Nighty",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Get the bot authorization link
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn authbot(ctx: Context<'_>) -> Result<()> {
    ctx.say("https://discord.com/oauth2/authorize?client_id=1423488983148531763")
        .await?;

    Ok(())
}

/// Understanding <p> commands
#[poise::command(slash_command, check = "crate::access::access_check")]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Understanding <p>",
        "> 1. You will see ``<p>`` in a script's Usage section (usually at the top).\n\
        > 2. ``<p>`` means prefix.\n\
        > 3. The default prefix is → ``.`` (a period).\n\
        > 4. Example: ``<p>lock`` = ``.lock``\n\
        > 5. You can change your prefix anytime with → ``/settings prefix``",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Legacy commands
#[poise::command(slash_command)]
pub async fn legacy(
    ctx: Context<'_>,
    #[description = "Optional: Mention someone outside the embed"] ping: Option<User>,
) -> Result<()> {
    let embed = support_embed(
        "Legacy Commands",
        "> All of Nighty's commands are `/` commands other than scripts.\n\
        > However, if you wish to use all of Nighty's commands as prefix commands, \
        you can use the `Legacy Commands` script.",
    );

    send_embed_with_ping(ctx, embed, ping).await
}

/// Power nighty auth
#[poise::command(slash_command)]
pub async fn nightyauth(ctx: Context<'_>) -> Result<()> {
    ctx.say("https://i.imgur.com/5Kupoxu.gif").await?;

    Ok(())
}
