use std::time::Duration;

use poise::serenity_prelude::{Colour, UserId};

// path to store the access-grant database file
pub const DB_PATH: &str = "./data/access.sqlite3";

// user IDs with unconditional access to every command, exempt from the cooldown
pub const ADMINS: [UserId; 3] = [
    UserId::new(1361736124858630274),
    UserId::new(277851641976324096),
    UserId::new(1093694817285971988),
];

// minimum interval between two permitted invocations by the same non-admin user,
// shared across all commands
pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(2);

// page size for the `/listaccess` roster
pub const ACCESS_PAGE_SIZE: usize = 10;

// how long the `/listaccess` pagination buttons stay active for
pub const MENU_TIMEOUT_SECS: u64 = 180;

// external fake-quote image generation API
pub const QUOTE_API_URL: &str = "https://api.voids.top/fakequote";

// pm2 process name used by `/reload`
pub const PM2_PROCESS: &str = "helpdesk-bot";

// accent colour for troubleshooting embeds
pub const EMBED_COLOUR: Colour = Colour::new(0x3480be);

// this user gets the alternate webview mirror in `/webview` and `/brokenwebview`
pub const ALT_WEBVIEW_USER: UserId = UserId::new(277851641976324096);
pub const WEBVIEW_LINK: &str = "https://webview.niggy.one";
pub const ALT_WEBVIEW_LINK: &str = "https://webview.pyro.pics";

// part of error messages
pub const BOT_MAINTAINER: UserId = UserId::new(1361736124858630274);
