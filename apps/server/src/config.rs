//! Application configuration.
//!
//! Everything is read from the environment (a `.env` file is loaded first
//! by `main`). Missing credentials abort startup.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use watcher_alerts::DEFAULT_NOTIFY_TIMEOUT;
use watcher_feeds::{DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL};

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const RPC_URL_VAR: &str = "RPC_URL";
pub const WATCHLIST_PATH_VAR: &str = "WATCHLIST_PATH";
pub const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL_MS";
pub const RPC_TIMEOUT_VAR: &str = "RPC_TIMEOUT_MS";
pub const NOTIFY_TIMEOUT_VAR: &str = "NOTIFY_TIMEOUT_MS";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

pub const DEFAULT_WATCHLIST_PATH: &str = "watched.json";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Telegram bot token.
    pub bot_token: String,
    /// Chat that receives every notification.
    pub chat_id: i64,
    /// JSON-RPC endpoint.
    pub rpc_url: Url,
    /// Watch-list file.
    pub watchlist_path: PathBuf,
    /// Sleep between full passes over the watch-list.
    pub poll_interval: Duration,
    /// Per-fetch timeout.
    pub rpc_timeout: Duration,
    /// Per-message delivery timeout.
    pub notify_timeout: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("rpc_url", &self.rpc_url.as_str())
            .field("watchlist_path", &self.watchlist_path)
            .field("poll_interval", &self.poll_interval)
            .field("rpc_timeout", &self.rpc_timeout)
            .field("notify_timeout", &self.notify_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get(BOT_TOKEN_VAR).ok_or(ConfigError::Missing(BOT_TOKEN_VAR))?;

        let raw_chat_id = get(CHAT_ID_VAR).ok_or(ConfigError::Missing(CHAT_ID_VAR))?;
        let chat_id = raw_chat_id
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid {
                var: CHAT_ID_VAR,
                reason: format!("{} ({})", e, raw_chat_id),
            })?;
        if chat_id == 0 {
            return Err(ConfigError::Invalid {
                var: CHAT_ID_VAR,
                reason: "chat id must be non-zero".to_string(),
            });
        }

        let raw_url = get(RPC_URL_VAR).unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let rpc_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            var: RPC_URL_VAR,
            reason: format!("{} ({})", e, raw_url),
        })?;

        let watchlist_path = get(WATCHLIST_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WATCHLIST_PATH));

        Ok(Self {
            bot_token,
            chat_id,
            rpc_url,
            watchlist_path,
            poll_interval: parse_millis(POLL_INTERVAL_VAR, get(POLL_INTERVAL_VAR), DEFAULT_POLL_INTERVAL)?,
            rpc_timeout: parse_millis(RPC_TIMEOUT_VAR, get(RPC_TIMEOUT_VAR), DEFAULT_RPC_TIMEOUT)?,
            notify_timeout: parse_millis(NOTIFY_TIMEOUT_VAR, get(NOTIFY_TIMEOUT_VAR), DEFAULT_NOTIFY_TIMEOUT)?,
        })
    }
}

fn parse_millis(
    var: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: format!("{} ({})", e, raw),
        }),
    }
}

/// Log level from the environment, defaulting to `info`.
pub fn log_level_from_env() -> String {
    std::env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string())
}
