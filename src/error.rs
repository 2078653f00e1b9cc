use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Grok API error (HTTP {status})")]
    GrokApi { status: reqwest::StatusCode },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Grok response error: {0}")]
    MalformedResponse(String),

    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

impl BotError {
    /// Returns a bracketed placeholder string safe to send back to the chat
    /// verbatim. Never contains credentials or raw error dumps.
    pub fn user_message(&self) -> String {
        match self {
            BotError::MissingCredential(name) => format!("<{name} missing>"),
            BotError::GrokApi { status } => format!("<Grok API error – HTTP {status}>"),
            BotError::Transport(e) if e.is_timeout() => "<Grok API error – timed out>".to_string(),
            BotError::Transport(_) => "<Grok API error – network failure>".to_string(),
            BotError::MalformedResponse(_) => {
                "<Grok response malformed – expected JSON answer>".to_string()
            }
            BotError::Config(_) | BotError::EnvVar(_) | BotError::Telegram(_) => {
                "<internal error>".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
