//! Alert notification logic.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::ChatId;
use thiserror::Error;
use tracing::{debug, error};

/// Upper bound on a single delivery attempt when none is configured.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Destination chat not found: {0}")]
    ChatNotFound(i64),
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Chat transport able to deliver a pre-formatted message.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, destination: ChatId, message: &str) -> Result<(), AlertError>;
}

/// Outcome of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Delivery failed; the message is gone (no retry, no queue).
    Dropped,
}

/// Configuration for the notifier.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Chat every notification is sent to.
    pub destination: ChatId,
    /// Maximum time a single delivery may take.
    pub timeout: Duration,
}

impl NotifierConfig {
    pub fn new(destination: ChatId) -> Self {
        Self {
            destination,
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Best-effort notifier bound to a single destination.
pub struct Notifier {
    sink: Arc<dyn AlertSink>,
    config: NotifierConfig,
}

impl Notifier {
    /// Create a new notifier.
    pub fn new(sink: Arc<dyn AlertSink>, config: NotifierConfig) -> Self {
        Self { sink, config }
    }

    /// Deliver a message. Failures are logged and the message is dropped.
    pub async fn notify(&self, message: &str) -> Delivery {
        let destination = self.config.destination;
        let result = tokio::time::timeout(
            self.config.timeout,
            self.sink.deliver(destination, message),
        )
        .await
        .unwrap_or(Err(AlertError::Timeout(self.config.timeout)));

        match result {
            Ok(()) => {
                debug!(chat_id = destination.0, "Notification sent");
                Delivery::Sent
            }
            Err(e) => {
                error!(chat_id = destination.0, error = %e, "Failed to send notification, dropping it");
                Delivery::Dropped
            }
        }
    }
}
