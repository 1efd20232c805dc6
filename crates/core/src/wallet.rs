//! Watched wallet definitions.

use thiserror::Error;

/// Characters of the address used as a display name when none is given.
pub const DEFAULT_NAME_LEN: usize = 8;

/// Maximum address length: `0x` followed by 32 hex-encoded bytes.
pub const MAX_ADDRESS_LEN: usize = 66;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("Address contains non-hex characters: {0}")]
    NotHex(String),
    #[error("Address too long ({len} chars, max {MAX_ADDRESS_LEN}): {address}")]
    TooLong { address: String, len: usize },
}

/// Check that an address is `0x`-prefixed hex of at most `MAX_ADDRESS_LEN` chars.
pub fn validate_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    let Some(hex) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return Err(AddressError::MissingPrefix(address.to_string()));
    };
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::NotHex(address.to_string()));
    }
    if address.len() > MAX_ADDRESS_LEN {
        return Err(AddressError::TooLong {
            address: address.to_string(),
            len: address.len(),
        });
    }
    Ok(())
}

/// An address being monitored, with the name shown in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchedAddress {
    pub address: String,
    pub display_name: String,
}

impl WatchedAddress {
    /// Validate and build a watched address.
    /// The address is stored lowercased, so `0xAB` and `0xab` are the same wallet.
    /// A missing or blank name falls back to the first characters of the address.
    pub fn new(address: impl Into<String>, name: Option<&str>) -> Result<Self, AddressError> {
        let address = address.into().trim().to_ascii_lowercase();
        validate_address(&address)?;

        let display_name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => address.chars().take(DEFAULT_NAME_LEN).collect(),
        };

        Ok(Self {
            address,
            display_name,
        })
    }

    /// Shortened address for messages: first 6 and last 4 characters.
    pub fn short_address(&self) -> String {
        truncate_address(&self.address)
    }
}

/// `0x1234...abcd` style truncation. Short inputs are returned as-is.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
