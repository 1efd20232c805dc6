//! Telegram notifications for wallet balance changes.
//!
//! This crate provides:
//! - The `AlertSink` transport seam and its Telegram implementation
//! - A best-effort `Notifier` bound to one destination chat
//! - Formatting of balance-change messages

pub mod notifier;
pub mod telegram;

pub use notifier::{AlertError, AlertSink, Delivery, Notifier, NotifierConfig, DEFAULT_NOTIFY_TIMEOUT};
pub use telegram::{format_balance_message, TelegramBot};
pub use teloxide::types::ChatId;
