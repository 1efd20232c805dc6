//! Fixed-point balance amounts.
//!
//! Balances are kept as integer base units so that comparisons are exact.
//! Conversion to a human value only happens at display time.

use std::fmt;
use std::ops::Sub;
use thiserror::Error;

/// Errors produced when reading a base-unit amount from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceParseError {
    #[error("Empty balance value")]
    Empty,
    #[error("Balance is not a non-negative integer: {0}")]
    NotAnInteger(String),
    #[error("Balance out of range: {0}")]
    OutOfRange(String),
}

/// Native-token balance with 9 decimal places.
/// The inner value is the count of base units (1 SUI = 10^9 MIST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(pub u64);

impl Balance {
    /// Number of decimal places of the chain's base unit.
    pub const DECIMALS: u32 = 9;
    /// Decimal places kept when rendering for humans.
    pub const DISPLAY_DECIMALS: u32 = 6;

    pub const ZERO: Balance = Balance(0);

    /// Parse the base-unit integer string returned by the RPC node.
    pub fn parse_base_units(raw: &str) -> Result<Self, BalanceParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BalanceParseError::Empty);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BalanceParseError::NotAnInteger(raw.to_string()));
        }
        raw.parse::<u64>()
            .map(Self)
            .map_err(|_| BalanceParseError::OutOfRange(raw.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_scaled(self.0 as i128, false))
    }
}

/// Signed difference between two balances, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BalanceDelta(pub i128);

impl BalanceDelta {
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

/// Always carries an explicit sign, e.g. `+2.500000`.
impl fmt::Display for BalanceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_scaled(self.0, true))
    }
}

impl Sub for Balance {
    type Output = BalanceDelta;
    fn sub(self, rhs: Self) -> BalanceDelta {
        BalanceDelta(self.0 as i128 - rhs.0 as i128)
    }
}

/// Render base units as a decimal with `DISPLAY_DECIMALS` places and
/// thousands separators. Rounds half away from zero.
fn format_scaled(units: i128, force_sign: bool) -> String {
    let divisor = 10u128.pow(Balance::DECIMALS - Balance::DISPLAY_DECIMALS);
    let micro_scale = 10u128.pow(Balance::DISPLAY_DECIMALS);

    let magnitude = units.unsigned_abs();
    let rounded = (magnitude + divisor / 2) / divisor;
    let whole = rounded / micro_scale;
    let frac = rounded % micro_scale;

    let sign = if units < 0 {
        "-"
    } else if force_sign {
        "+"
    } else {
        ""
    };

    format!(
        "{}{}.{:0width$}",
        sign,
        group_thousands(whole),
        frac,
        width = Balance::DISPLAY_DECIMALS as usize
    )
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_base_units() {
        assert_eq!(
            Balance::parse_base_units("10000000000"),
            Ok(Balance(10_000_000_000))
        );
        assert_eq!(Balance::parse_base_units(" 0 "), Ok(Balance::ZERO));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Balance::parse_base_units(""), Err(BalanceParseError::Empty));
        assert!(matches!(
            Balance::parse_base_units("-5"),
            Err(BalanceParseError::NotAnInteger(_))
        ));
        assert!(matches!(
            Balance::parse_base_units("1.5"),
            Err(BalanceParseError::NotAnInteger(_))
        ));
        assert!(matches!(
            Balance::parse_base_units("99999999999999999999999"),
            Err(BalanceParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_display_six_decimals() {
        assert_eq!(Balance(10_000_000_000).to_string(), "10.000000");
        assert_eq!(Balance(12_500_000_000).to_string(), "12.500000");
        assert_eq!(Balance(0).to_string(), "0.000000");
        assert_eq!(Balance(1_234_567_890_123_456).to_string(), "1,234,567.890123");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Balance(1_000_000_500).to_string(), "1.000001");
        assert_eq!(Balance(1_000_000_499).to_string(), "1.000000");
        assert_eq!(Balance(999_999_999).to_string(), "1.000000");
    }

    #[test]
    fn test_delta_sign_and_format() {
        let delta = Balance(12_500_000_000) - Balance(10_000_000_000);
        assert_eq!(delta, BalanceDelta(2_500_000_000));
        assert!(delta.is_positive());
        assert_eq!(delta.to_string(), "+2.500000");

        let delta = Balance(10_000_000_000) - Balance(1_010_000_000_000);
        assert!(delta.is_negative());
        assert_eq!(delta.to_string(), "-1,000.000000");
    }

    #[test]
    fn test_delta_exact_comparison() {
        // One base unit is a real change even though it rounds away on display.
        let delta = Balance(10_000_000_001) - Balance(10_000_000_000);
        assert!(delta.is_positive());
        assert_eq!(delta.to_string(), "+0.000000");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
