//! B3 ticker symbol validation
//!
//! Every operation in this crate takes a `TickerSymbol`, which can only be
//! built through [`TickerSymbol::parse`]. Validation happens here, once,
//! before any network call is dispatched.

use crate::error::{InvestError, Result};
use serde::Serialize;

/// A validated B3 ticker symbol
///
/// B3 symbols are four ASCII letters followed by one or two digits
/// (`PETR4`, `BBAS3`, `HGLG11`). Input is uppercased and an optional `.SA`
/// suffix (the Yahoo-style exchange qualifier) is stripped before
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Parse and validate a raw ticker string
    ///
    /// # Errors
    ///
    /// Returns `InvestError::InvalidTicker` when the input is empty or does
    /// not match the B3 convention after normalization.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvestError::InvalidTicker("empty symbol".to_string()));
        }

        let upper = trimmed.to_uppercase();
        let symbol = upper.strip_suffix(".SA").unwrap_or(&upper);

        if !Self::matches_b3_pattern(symbol) {
            return Err(InvestError::InvalidTicker(format!(
                "{trimmed} does not match the B3 convention (4 letters + 1-2 digits)"
            )));
        }

        Ok(Self(symbol.to_string()))
    }

    /// 4 ASCII letters followed by 1 or 2 ASCII digits
    fn matches_b3_pattern(symbol: &str) -> bool {
        let bytes = symbol.as_bytes();
        if !(5..=6).contains(&bytes.len()) {
            return false;
        }

        bytes[..4].iter().all(u8::is_ascii_uppercase)
            && bytes[4..].iter().all(u8::is_ascii_digit)
    }

    /// The validated uppercase symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for TickerSymbol {
    type Err = InvestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_symbols() {
        for input in ["PETR4", "BBAS3", "VALE3", "HGLG11", "BBDC3"] {
            let ticker = TickerSymbol::parse(input).unwrap();
            assert_eq!(ticker.as_str(), input);
        }
    }

    #[test]
    fn test_lowercase_is_normalized() {
        let ticker = TickerSymbol::parse("petr4").unwrap();
        assert_eq!(ticker.as_str(), "PETR4");
    }

    #[test]
    fn test_sa_suffix_is_stripped() {
        let ticker = TickerSymbol::parse("PETR4.SA").unwrap();
        assert_eq!(ticker.as_str(), "PETR4");

        let ticker = TickerSymbol::parse("bbas3.sa").unwrap();
        assert_eq!(ticker.as_str(), "BBAS3");
    }

    #[test]
    fn test_invalid_symbols_rejected() {
        for input in ["", "  ", "PETR", "PETRO4", "PET4", "1234X", "PETR444", "PE-R4", "ABCDE"] {
            assert!(
                TickerSymbol::parse(input).is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        let ticker: TickerSymbol = "vale3".parse().unwrap();
        assert_eq!(ticker.to_string(), "VALE3");
    }
}
