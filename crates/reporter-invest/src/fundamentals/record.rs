//! The unified fundamentals record and its parts

use crate::error::FetchError;
use crate::fundamentals::schema::{CanonicalField, ProviderKind};
use crate::ticker::TickerSymbol;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// A canonical field value with its provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedField {
    /// Canonical field name
    pub field: CanonicalField,
    /// Typed value; fractions of one for percentage-style fields
    pub value: f64,
    /// Which provider this value came from
    pub provider: ProviderKind,
}

impl NormalizedField {
    /// Create a normalized field value
    pub fn new(field: CanonicalField, value: f64, provider: ProviderKind) -> Self {
        Self {
            field,
            value,
            provider,
        }
    }
}

/// Materially different values reported by both providers for one field
///
/// Recorded whenever the relative difference exceeds the tolerance or the
/// signs disagree. The merged record still carries a deterministically
/// chosen value; the discrepancy is surfaced alongside it, never hidden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiscrepancy {
    /// The disputed canonical field
    pub field: CanonicalField,
    /// Value reported by brapi
    pub brapi: f64,
    /// Value reported by Investidor10
    pub investidor10: f64,
    /// `|a-b| / max(|a|, |b|, epsilon)`
    pub relative_difference: f64,
}

/// Coarse confidence indicator for one reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Both providers answered and agreed on every shared field
    Ok,
    /// One provider failed, or the providers disagreed somewhere
    Partial,
    /// Both providers failed, or too few fields survived to be useful
    Degraded,
}

impl DataQuality {
    /// Stable lowercase name, used in logs and serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Partial => "partial",
            Self::Degraded => "degraded",
        }
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The best-effort merge of both providers' fundamentals for one ticker
///
/// Created by one reconciliation call, immutable afterwards, consumed once
/// by report generation. All collections are ordered, so serializing the
/// same inputs twice yields byte-identical output.
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedFundamentalsRecord {
    /// The ticker this record describes
    pub ticker: TickerSymbol,
    /// Chosen value per canonical field; absent fields are simply missing
    pub fields: BTreeMap<CanonicalField, NormalizedField>,
    /// Fields on which the providers materially disagreed
    pub discrepancies: Vec<FieldDiscrepancy>,
    /// Provider-level fetch failures, as data
    pub errors: Vec<FetchError>,
    /// Overall confidence in this record
    pub quality: DataQuality,
}

impl UnifiedFundamentalsRecord {
    /// Look up a field with its provenance
    pub fn get(&self, field: CanonicalField) -> Option<&NormalizedField> {
        self.fields.get(&field)
    }

    /// The chosen value for a field, if present
    pub fn value(&self, field: CanonicalField) -> Option<f64> {
        self.fields.get(&field).map(|f| f.value)
    }

    /// Which provider the chosen value came from, if the field is present
    pub fn provenance(&self, field: CanonicalField) -> Option<ProviderKind> {
        self.fields.get(&field).map(|f| f.provider)
    }

    /// Display-ready rendering of one field's value
    pub fn display_value(&self, field: CanonicalField) -> Option<String> {
        self.value(field).map(|v| format_field_value(field, v))
    }

    /// Flat mapping of canonical field name to display-ready value
    ///
    /// This is the shape downstream report generation consumes.
    pub fn display_map(&self) -> BTreeMap<&'static str, String> {
        self.fields
            .values()
            .map(|f| (f.field.as_str(), format_field_value(f.field, f.value)))
            .collect()
    }

    /// JSON payload handed to the report pipeline
    ///
    /// Carries the flat value map plus provenance, discrepancies, fetch
    /// errors and the quality flag, so a degraded record still lets the
    /// rater produce a complete, caveated report.
    pub fn to_report_json(&self) -> serde_json::Value {
        let values: BTreeMap<&str, f64> = self
            .fields
            .values()
            .map(|f| (f.field.as_str(), f.value))
            .collect();
        let provenance: BTreeMap<&str, &str> = self
            .fields
            .values()
            .map(|f| (f.field.as_str(), f.provider.as_str()))
            .collect();

        json!({
            "ticker": self.ticker.as_str(),
            "fundamentals": values,
            "display": self.display_map(),
            "provenance": provenance,
            "discrepancies": self.discrepancies,
            "errors": self.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "quality": self.quality.as_str(),
        })
    }
}

/// Render a canonical field value for display
///
/// Fractions become percentages here and only here; reconciliation always
/// works on the normalized fraction-of-one representation.
pub fn format_field_value(field: CanonicalField, value: f64) -> String {
    if field.is_fraction() {
        return format!("{:.2}%", value * 100.0);
    }

    if field == CanonicalField::MarketCap {
        return format_brl_magnitude(value);
    }

    if field.is_currency() {
        return format!("R$ {value:.2}");
    }

    format!("{value:.0}")
}

/// Format a BRL amount with a magnitude suffix
fn format_brl_magnitude(amount: f64) -> String {
    if amount.abs() >= 1_000_000_000_000.0 {
        format!("R$ {:.2}T", amount / 1_000_000_000_000.0)
    } else if amount.abs() >= 1_000_000_000.0 {
        format!("R$ {:.2}B", amount / 1_000_000_000.0)
    } else if amount.abs() >= 1_000_000.0 {
        format!("R$ {:.2}M", amount / 1_000_000.0)
    } else {
        format!("R$ {amount:.2}")
    }
}
