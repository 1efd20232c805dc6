//! Sui JSON-RPC balance client.
//!
//! Issues `suix_getBalance` for the native coin and converts the
//! base-unit `totalBalance` string into a [`Balance`].

use crate::error::{FeedError, FeedResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;
use watcher_core::Balance;

/// Public Sui mainnet endpoint used when none is configured.
pub const DEFAULT_RPC_URL: &str = "https://rpc-mainnet.suiscan.xyz/";

/// Coin type of the native SUI token.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Display symbol of the native token.
pub const SUI_SYMBOL: &str = "SUI";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(3);

const GET_BALANCE_METHOD: &str = "suix_getBalance";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (&'a str, &'a str),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<BalanceResult>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    #[serde(rename = "totalBalance", default)]
    total_balance: Option<serde_json::Value>,
}

/// JSON-RPC client for a single Sui fullnode endpoint.
#[derive(Debug, Clone)]
pub struct SuiRpcClient {
    client: Client,
    endpoint: Url,
}

impl SuiRpcClient {
    /// Create a client whose every request is bounded by `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::ClientBuild(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Fetch the native-coin balance of `address`.
    pub async fn get_balance(&self, address: &str) -> FeedResult<Balance> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: GET_BALANCE_METHOD,
            params: (address, SUI_COIN_TYPE),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(address = address, body_len = body.len(), "Balance response received");

        parse_balance_response(&body)
    }
}

/// Parse a `suix_getBalance` response body.
pub fn parse_balance_response(body: &str) -> FeedResult<Balance> {
    let response: RpcResponse = serde_json::from_str(body)?;

    if let Some(err) = response.error {
        return Err(FeedError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    let total = response
        .result
        .ok_or(FeedError::MissingField("result"))?
        .total_balance
        .ok_or(FeedError::MissingField("totalBalance"))?;

    // Nodes send a decimal string; tolerate a bare integer too.
    match total {
        serde_json::Value::String(raw) => Ok(Balance::parse_base_units(&raw)?),
        serde_json::Value::Number(n) => Ok(Balance::parse_base_units(&n.to_string())?),
        _ => Err(FeedError::MissingField("totalBalance")),
    }
}
