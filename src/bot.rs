//! Bot wiring: shared state and the long-polling dispatcher loop.

use std::sync::Arc;

use log::{debug, info};
use teloxide::prelude::*;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::error::Result;
use crate::grok::GrokClient;
use crate::handler::handle_group_message;
use crate::history::HistoryStore;
use crate::identity::BotIdentity;

/// Shared state injected into every handler invocation.
pub struct AppState {
    pub config: Config,
    pub grok: GrokClient,
    pub history: HistoryStore,
    identity: OnceCell<BotIdentity>,
}

impl AppState {
    pub fn new(config: Config, grok: GrokClient) -> Self {
        let history = HistoryStore::new(config.message_limit);
        Self {
            config,
            grok,
            history,
            identity: OnceCell::new(),
        }
    }

    /// Returns the bot's identity, resolving it via `getMe` on first call
    /// and reusing the cached value afterwards. Concurrent first calls are
    /// coalesced into a single resolution.
    pub async fn identity(&self, bot: &Bot) -> Result<&BotIdentity> {
        self.identity
            .get_or_try_init(|| BotIdentity::resolve(bot))
            .await
    }
}

/// Run the bot: load configuration, build the shared state, and drive the
/// Telegram long-polling dispatcher until the process exits.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing Grok client");
    let grok = GrokClient::new(config.xai_api_key.clone(), config.grok_timeout)?;

    let bot = Bot::new(config.bot_token.clone());
    let state = Arc::new(AppState::new(config, grok));

    let handler = Update::filter_message()
        .filter(|msg: Message| msg.chat.is_group() || msg.chat.is_supergroup())
        .endpoint(handle_group_message);

    info!("Starting long-polling dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|_upd| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
