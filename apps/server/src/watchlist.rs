//! Watch-list loading.
//!
//! The file is a JSON array of `{ "address": "0x...", "name": "optional" }`
//! objects. A missing or corrupt file yields an empty list; malformed
//! entries are skipped one by one.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use watcher_core::WatchedAddress;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Watch-list must be a JSON array")]
    NotAnArray,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    address: String,
    /// Kept loose so a bad name does not cost the wallet.
    #[serde(default)]
    name: Option<serde_json::Value>,
}

impl RawEntry {
    fn name(&self, index: usize) -> Option<&str> {
        match &self.name {
            None => None,
            Some(serde_json::Value::String(name)) => Some(name),
            Some(other) => {
                warn!(
                    index = index,
                    "Watch-list name is not a string ({}), using the default name", other
                );
                None
            }
        }
    }
}

/// Load the watch-list, falling back to an empty list on any file-level error.
pub fn load_watchlist(path: &Path) -> Vec<WatchedAddress> {
    match read_watchlist(path) {
        Ok(wallets) => {
            info!("📋 Loaded {} wallets from {}", wallets.len(), path.display());
            wallets
        }
        Err(e) => {
            warn!("⚠️ Could not load watch-list, monitoring no wallets: {}", e);
            Vec::new()
        }
    }
}

/// Read and validate the watch-list file.
pub fn read_watchlist(path: &Path) -> Result<Vec<WatchedAddress>, WatchlistError> {
    let contents = std::fs::read_to_string(path).map_err(|source| WatchlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_watchlist(&contents)
}

/// Validate watch-list JSON into typed entries.
/// Entries that are malformed or repeat an earlier address are skipped with a warning.
pub fn parse_watchlist(json: &str) -> Result<Vec<WatchedAddress>, WatchlistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(WatchlistError::NotAnArray);
    };

    let mut seen = HashSet::new();
    let mut wallets = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let raw: RawEntry = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index = index, "Skipping watch-list entry: {}", e);
                continue;
            }
        };

        let wallet = match WatchedAddress::new(raw.address.as_str(), raw.name(index)) {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!(index = index, "Skipping watch-list entry: {}", e);
                continue;
            }
        };

        if !seen.insert(wallet.address.clone()) {
            warn!(
                index = index,
                address = %wallet.short_address(),
                "Skipping duplicate watch-list entry"
            );
            continue;
        }

        wallets.push(wallet);
    }

    Ok(wallets)
}
