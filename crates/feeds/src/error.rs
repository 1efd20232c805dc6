//! Error types for balance fetching.

use thiserror::Error;
use watcher_core::BalanceParseError;

/// Errors that can occur while fetching a balance from the RPC node.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Response is missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid balance: {0}")]
    InvalidBalance(#[from] BalanceParseError),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else {
            FeedError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
