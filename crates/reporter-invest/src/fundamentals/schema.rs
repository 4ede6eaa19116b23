//! Canonical field schema and provider precedence
//!
//! The canonical field set is fixed and shared across providers; adapters
//! map their own field names onto it during normalization and nowhere else.
//! The per-field-class provider precedence is data here, not scattered
//! conditionals, so the conflict-resolution policy is testable on its own.

use serde::{Deserialize, Serialize};

/// The two fundamentals providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// brapi.dev quote API - structured JSON, exchange-sourced market data
    Brapi,
    /// Investidor10 fundamentals page - scraped pt-BR HTML
    Investidor10,
}

impl ProviderKind {
    /// Stable lowercase name, used in logs and serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brapi => "brapi",
            Self::Investidor10 => "investidor10",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which class of metric a canonical field belongs to
///
/// Each provider is more reliable for a different class: the structured
/// quote API for exchange-sourced market figures, the fundamentals site for
/// statement-derived valuation ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldClass {
    /// Price and trading figures straight from the exchange
    Market,
    /// Ratios derived from financial statements
    Valuation,
}

impl FieldClass {
    /// The provider preferred when both report a field of this class
    pub fn primary_provider(self) -> ProviderKind {
        match self {
            Self::Market => ProviderKind::Brapi,
            Self::Valuation => ProviderKind::Investidor10,
        }
    }
}

/// The fixed, source-independent set of fundamentals metrics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CanonicalField {
    /// Latest trade price
    #[serde(rename = "price")]
    Price,
    /// Price / earnings ratio
    #[serde(rename = "pe_ratio")]
    PeRatio,
    /// Market capitalization in BRL
    #[serde(rename = "market_cap")]
    MarketCap,
    /// Trailing dividend yield as a fraction of one
    #[serde(rename = "dividend_yield")]
    DividendYield,
    /// Return on equity as a fraction of one
    #[serde(rename = "roe")]
    Roe,
    /// 52-week high price
    #[serde(rename = "52w_high")]
    High52w,
    /// 52-week low price
    #[serde(rename = "52w_low")]
    Low52w,
    /// Average daily traded volume in shares
    #[serde(rename = "avg_volume")]
    AvgVolume,
}

impl CanonicalField {
    /// Every canonical field, in the record's deterministic order
    pub const ALL: [CanonicalField; 8] = [
        Self::Price,
        Self::PeRatio,
        Self::MarketCap,
        Self::DividendYield,
        Self::Roe,
        Self::High52w,
        Self::Low52w,
        Self::AvgVolume,
    ];

    /// The canonical name shared across providers
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PeRatio => "pe_ratio",
            Self::MarketCap => "market_cap",
            Self::DividendYield => "dividend_yield",
            Self::Roe => "roe",
            Self::High52w => "52w_high",
            Self::Low52w => "52w_low",
            Self::AvgVolume => "avg_volume",
        }
    }

    /// Which metric class the field belongs to
    pub fn class(self) -> FieldClass {
        match self {
            Self::Price | Self::MarketCap | Self::High52w | Self::Low52w | Self::AvgVolume => {
                FieldClass::Market
            }
            Self::PeRatio | Self::DividendYield | Self::Roe => FieldClass::Valuation,
        }
    }

    /// The provider preferred when both report this field
    pub fn primary_provider(self) -> ProviderKind {
        self.class().primary_provider()
    }

    /// Whether the value is stored as a fraction of one and displayed as a
    /// percentage
    pub fn is_fraction(self) -> bool {
        matches!(self, Self::DividendYield | Self::Roe)
    }

    /// Whether the value is a BRL amount
    pub fn is_currency(self) -> bool {
        matches!(
            self,
            Self::Price | Self::MarketCap | Self::High52w | Self::Low52w
        )
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
