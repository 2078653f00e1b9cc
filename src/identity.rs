//! The bot's own Telegram identity, resolved once per process.

use teloxide::prelude::*;
use teloxide::types::UserId;

use crate::error::Result;

/// Identity values needed for mention detection and snippet rendering.
///
/// Resolved lazily on first use (see `AppState::identity`) and read-only for
/// the rest of the process lifetime.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    /// Lowercased mention handle including the `@` prefix, e.g. `"@grokgram_bot"`.
    pub mention: String,
    /// Human-readable name used to label the bot's own history lines.
    pub display_name: String,
    pub id: UserId,
}

impl BotIdentity {
    /// Fetches the bot's identity from Telegram via `getMe`.
    pub async fn resolve(bot: &Bot) -> Result<Self> {
        let me = bot.get_me().await?;
        let display_name = if me.first_name.is_empty() {
            "Bot".to_string()
        } else {
            me.first_name.clone()
        };
        Ok(Self {
            mention: format!("@{}", me.username().to_lowercase()),
            display_name,
            id: me.id,
        })
    }
}
