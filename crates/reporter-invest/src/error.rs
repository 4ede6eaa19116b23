//! Error types for the invest reporter
//!
//! Two layers live here. `FetchError` is the typed, serializable failure a
//! provider adapter returns as data; it is folded into the unified record's
//! `errors` list rather than propagated. `InvestError` is the crate's
//! ordinary error type for everything that is a real failure (bad ticker,
//! bad configuration, broken pipeline).

use crate::fundamentals::ProviderKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for invest reporter operations
pub type Result<T> = std::result::Result<T, InvestError>;

/// Classification of a provider fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The ticker does not exist at this provider
    NotFound,
    /// Network-level failure, including timeouts
    Transport,
    /// The provider answered but the payload could not be interpreted
    Parse,
    /// The provider refused the request due to rate limiting
    RateLimited,
}

impl FetchErrorKind {
    /// Stable lowercase name, used in logs and serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::Parse => "parse",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider-level fetch failure, returned as data
///
/// Adapters never raise past their boundary; every transport, parse,
/// not-found or rate-limit failure becomes one of these and ends up in the
/// unified record's `errors` list.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{provider} fetch failed ({kind}): {message}")]
pub struct FetchError {
    /// Which provider failed
    pub provider: ProviderKind,
    /// Failure classification
    pub kind: FetchErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl FetchError {
    /// Create a fetch error
    pub fn new(provider: ProviderKind, kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            message: message.into(),
        }
    }

    /// Ticker unknown at this provider
    pub fn not_found(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::new(provider, FetchErrorKind::NotFound, message)
    }

    /// Network failure or timeout
    pub fn transport(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::new(provider, FetchErrorKind::Transport, message)
    }

    /// Unintelligible payload
    pub fn parse(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::new(provider, FetchErrorKind::Parse, message)
    }

    /// Provider rate limit hit
    pub fn rate_limited(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::new(provider, FetchErrorKind::RateLimited, message)
    }
}

/// Invest reporter errors
#[derive(Debug, Error)]
pub enum InvestError {
    /// Ticker did not match the B3 symbol convention
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// News feed retrieval or parsing failed
    #[error("News feed error: {0}")]
    NewsFeed(String),

    /// A regular expression in an extractor failed to compile
    #[error("Invalid extraction pattern: {0}")]
    PatternError(String),

    /// Prompt template rendering failed
    #[error("Prompt template error: {0}")]
    TemplateError(String),

    /// The report pipeline failed
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Convert InvestError to reporter_core::Error
impl From<InvestError> for reporter_core::Error {
    fn from(err: InvestError) -> Self {
        reporter_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert reporter_core::Error to InvestError
impl From<reporter_core::Error> for InvestError {
    fn from(err: reporter_core::Error) -> Self {
        InvestError::Pipeline(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::not_found(ProviderKind::Brapi, "no results for XXXX9");
        assert_eq!(
            err.to_string(),
            "brapi fetch failed (not_found): no results for XXXX9"
        );
    }

    #[test]
    fn test_fetch_error_serializes_kind_as_snake_case() {
        let err = FetchError::rate_limited(ProviderKind::Investidor10, "429");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "rate_limited");
        assert_eq!(json["provider"], "investidor10");
    }

    #[test]
    fn test_invest_error_display() {
        let err = InvestError::InvalidTicker("petrobras".to_string());
        assert_eq!(err.to_string(), "Invalid ticker: petrobras");
    }

    #[test]
    fn test_error_conversion_to_core() {
        let err = InvestError::ConfigError("missing model".to_string());
        let core_err: reporter_core::Error = err.into();

        match core_err {
            reporter_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("Configuration error"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }
}
