use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::chatbot::gemini::DEFAULT_MODEL;

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    Missing(&'static str),
    /// A variable is set but unusable.
    Invalid { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "{var} is not set"),
            Self::Invalid { var, reason } => write!(f, "{var} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub telegram_bot_token: String,
    pub gemini_api_token: String,
    /// JSON knowledge document, read on the first question.
    pub knowledge_path: PathBuf,
    pub gemini_model: String,
    /// No timeout when unset.
    pub gemini_timeout: Option<Duration>,
    /// Pause between segments of a split answer.
    pub chunk_delay: Duration,
    pub log_dir: PathBuf,
}

impl Config {
    /// Load from the process environment, after applying a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telegram_bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = telegram_bot_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Invalid {
                var: "TELEGRAM_BOT_TOKEN",
                reason: "expected format 123456789:ABCdefGHI...".into(),
            });
        }

        let gemini_api_token = get("GEMINI_API_TOKEN").ok_or(ConfigError::Missing("GEMINI_API_TOKEN"))?;

        let gemini_timeout = match get("GEMINI_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "GEMINI_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got '{v}'"),
                    });
                }
            },
            None => None,
        };

        let chunk_delay = match get("CHUNK_DELAY_MS") {
            Some(v) => v.parse::<u64>().map(Duration::from_millis).map_err(|e| ConfigError::Invalid {
                var: "CHUNK_DELAY_MS",
                reason: e.to_string(),
            })?,
            None => Duration::from_millis(500),
        };

        Ok(Self {
            telegram_bot_token,
            gemini_api_token,
            knowledge_path: get("KNOWLEDGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("usat.json")),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_timeout,
            chunk_delay,
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("logs")),
        })
    }
}
