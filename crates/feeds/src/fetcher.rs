//! Balance fetcher contract used by the monitor loop.

use crate::rpc::SuiRpcClient;
use async_trait::async_trait;
use tracing::warn;
use watcher_core::{Balance, DEFAULT_NAME_LEN};

/// Outcome of a single balance fetch.
/// Every failure mode (timeout, bad response, missing field) collapses to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchResult {
    Value(Balance),
    Failed,
}

/// Source of balances for watched addresses.
#[async_trait]
pub trait BalanceFetcher: Send + Sync {
    /// Fetch the current balance. Never fails; errors are logged and reported as `Failed`.
    async fn fetch_balance(&self, address: &str) -> FetchResult;
}

#[async_trait]
impl BalanceFetcher for SuiRpcClient {
    async fn fetch_balance(&self, address: &str) -> FetchResult {
        match self.get_balance(address).await {
            Ok(balance) => FetchResult::Value(balance),
            Err(e) => {
                let prefix: String = address.chars().take(DEFAULT_NAME_LEN).collect();
                warn!(address = %prefix, error = %e, "Balance fetch failed");
                FetchResult::Failed
            }
        }
    }
}
