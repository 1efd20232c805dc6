//! Telegram transport and message formatting.

use crate::notifier::{AlertError, AlertSink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use teloxide::utils::html;
use teloxide::{ApiError, RequestError};
use watcher_core::WatchedAddress;
use watcher_engine::{BalanceChange, Direction};

const SEPARATOR: &str = "──────────────────────────────";

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    /// Create a new bot with the given token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Check the token against the API. Returns the bot's username.
    pub async fn verify(&self) -> Result<String, AlertError> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Send an HTML message to a chat.
    pub async fn send_alert(&self, chat_id: ChatId, message: &str) -> Result<(), AlertError> {
        match self
            .bot
            .send_message(chat_id, message)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => Ok(()),
            Err(RequestError::Api(ApiError::ChatNotFound)) => {
                Err(AlertError::ChatNotFound(chat_id.0))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AlertSink for TelegramBot {
    async fn deliver(&self, destination: ChatId, message: &str) -> Result<(), AlertError> {
        self.send_alert(destination, message).await
    }
}

/// Format a balance change as an HTML alert message.
pub fn format_balance_message(
    wallet: &WatchedAddress,
    change: &BalanceChange,
    symbol: &str,
    at: DateTime<Utc>,
) -> String {
    let marker = match change.direction {
        Direction::Increase => "🟢",
        Direction::Decrease => "🔴",
    };

    format!(
        "📢 <b>{symbol} wallet balance update!</b>\n\
         {SEPARATOR}\n\
         👤 <b>Wallet:</b> <code>{name}</code>\n\
         🏷️ <b>Address:</b> <code>{address}</code>\n\
         {marker} <b>Balance:</b> <code>{new} {symbol}</code>\n\
         💸 <b>Change:</b> <code>{delta} {symbol}</code>\n\
         {SEPARATOR}\n\
         ⏰ {time}",
        name = html::escape(&wallet.display_name),
        address = wallet.short_address(),
        new = change.new,
        delta = change.delta,
        time = at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
