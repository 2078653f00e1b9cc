use std::env;
use std::time::Duration;

use log::{debug, error, info};

use crate::error::{BotError, Result};

const DEFAULT_MAX_SNIPPET_LEN: usize = 160;
const DEFAULT_MESSAGE_LIMIT: usize = 30;
const DEFAULT_GROK_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub xai_api_key: String,
    /// Max chars kept from each message when rendering a history snippet.
    pub max_snippet_len: usize,
    /// Max number of recent messages kept per chat.
    pub message_limit: usize,
    /// Per-call timeout for the Grok completions endpoint.
    pub grok_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let bot_token = env::var("BOT_TOKEN").map_err(|e| {
            error!("Failed to load BOT_TOKEN from environment: {}", e);
            e
        })?;

        let xai_api_key = env::var("XAI_API_KEY").map_err(|e| {
            error!("Failed to load XAI_API_KEY from environment: {}", e);
            e
        })?;

        let max_snippet_len = optional_parsed("MAX_SNIPPET_LEN", DEFAULT_MAX_SNIPPET_LEN)?;
        if max_snippet_len == 0 {
            return Err(BotError::Config(
                "MAX_SNIPPET_LEN must be at least 1".to_string(),
            ));
        }
        let message_limit = optional_parsed("MESSAGE_LIMIT", DEFAULT_MESSAGE_LIMIT)?;
        if message_limit == 0 {
            return Err(BotError::Config(
                "MESSAGE_LIMIT must be at least 1".to_string(),
            ));
        }
        let timeout_secs: u64 = optional_parsed("GROK_TIMEOUT_SECS", DEFAULT_GROK_TIMEOUT_SECS)?;

        info!("Configuration loaded successfully");
        debug!("Bot token length: {} characters", bot_token.len());
        debug!("xAI API key length: {} characters", xai_api_key.len());
        debug!("Max snippet length: {} characters", max_snippet_len);
        debug!("Message limit: {} per chat", message_limit);
        debug!("Grok timeout: {} seconds", timeout_secs);

        Ok(Self {
            bot_token,
            xai_api_key,
            max_snippet_len,
            message_limit,
            grok_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn optional_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| BotError::Config(format!("{name} must be a positive integer: {raw:?}"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}
