//! Provider abstraction and the raw fetch record

use crate::error::FetchError;
use crate::fundamentals::schema::ProviderKind;
use crate::ticker::TickerSymbol;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw value as reported by a provider, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Free-form text, e.g. a pt-BR formatted amount like `"R$ 36,75"`
    Text(String),
    /// A number the provider already delivered as such
    Number(f64),
}

impl RawValue {
    /// The value as a number, if the provider delivered one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// The value as text, if the provider delivered one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }
}

/// Provider-specific snapshot of raw fundamentals
///
/// One instance per provider per query, timestamped at fetch time. The field
/// names are the provider's own (API field names or scraped labels); the
/// normalizer is the only component that interprets them. Never mutated
/// after the adapter hands it over, and discarded after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFundamentalsRecord {
    /// Which provider produced this record
    pub provider: ProviderKind,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
    fields: BTreeMap<String, RawValue>,
}

impl RawFundamentalsRecord {
    /// Create an empty record stamped with the current time
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            fetched_at: Utc::now(),
            fields: BTreeMap::new(),
        }
    }

    /// Store a numeric field under the provider's own name
    pub fn insert_number(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), RawValue::Number(value));
    }

    /// Store a text field under the provider's own name; empty text is
    /// dropped rather than stored
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.insert(name.into(), RawValue::Text(value));
        }
    }

    /// Look up a raw field by the provider's own name
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// Number of raw fields captured
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the fetch yielded no usable fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(provider field name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A source of raw fundamentals for one external provider
///
/// Implementations perform network I/O only; they hold no shared mutable
/// state, perform no retries (that policy belongs to the engine), and never
/// let a failure escape as anything but a typed [`FetchError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Which provider this adapter talks to
    fn kind(&self) -> ProviderKind;

    /// Fetch raw fundamentals for a validated ticker
    async fn fetch(&self, ticker: &TickerSymbol) -> Result<RawFundamentalsRecord, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_not_stored() {
        let mut record = RawFundamentalsRecord::new(ProviderKind::Investidor10);
        record.insert_text("Preço", "R$ 36,75");
        record.insert_text("P/L", "   ");

        assert_eq!(record.len(), 1);
        assert!(record.get("P/L").is_none());
    }

    #[test]
    fn test_raw_value_accessors() {
        assert_eq!(RawValue::Number(5.65).as_number(), Some(5.65));
        assert_eq!(RawValue::Number(5.65).as_text(), None);
        assert_eq!(
            RawValue::Text("12,5%".to_string()).as_text(),
            Some("12,5%")
        );
    }

    #[test]
    fn test_record_iteration_is_sorted() {
        let mut record = RawFundamentalsRecord::new(ProviderKind::Brapi);
        record.insert_number("regularMarketPrice", 21.31);
        record.insert_number("marketCap", 122_124_000_000.0);

        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["marketCap", "regularMarketPrice"]);
    }
}
