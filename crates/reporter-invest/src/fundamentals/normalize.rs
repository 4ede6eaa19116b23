//! Normalization of raw provider records onto the canonical schema
//!
//! Each provider gets a mapping table from its own field names to canonical
//! fields. Normalization is field-granular: an unparseable value drops that
//! field only, and raw fields with no canonical counterpart are ignored.
//! All unit conversion happens here - percentages become fractions of one,
//! pt-BR formatted amounts (`R$ 1.234,56`, `122,12 Bilhões`) become plain
//! numbers - and nowhere else.

use crate::fundamentals::provider::{RawFundamentalsRecord, RawValue};
use crate::fundamentals::record::NormalizedField;
use crate::fundamentals::schema::{CanonicalField, ProviderKind};
use std::collections::BTreeMap;
use tracing::debug;

/// How a raw value must be converted into the canonical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    /// Use the numeric value as-is
    Plain,
    /// Provider reports a percentage; store as fraction of one
    Percent,
}

/// brapi quote API field names → canonical fields
const BRAPI_FIELDS: [(CanonicalField, &str, Unit); 7] = [
    (CanonicalField::Price, "regularMarketPrice", Unit::Plain),
    (CanonicalField::PeRatio, "priceEarnings", Unit::Plain),
    (CanonicalField::MarketCap, "marketCap", Unit::Plain),
    (CanonicalField::DividendYield, "dividendYield", Unit::Percent),
    (CanonicalField::High52w, "fiftyTwoWeekHigh", Unit::Plain),
    (CanonicalField::Low52w, "fiftyTwoWeekLow", Unit::Plain),
    (CanonicalField::AvgVolume, "averageDailyVolume3Month", Unit::Plain),
];

/// Investidor10 scraped indicator labels → canonical fields
///
/// The page's daily liquidity figure is a BRL turnover, not a share count,
/// so it deliberately has no mapping to `avg_volume`.
const INVESTIDOR10_FIELDS: [(CanonicalField, &str, Unit); 5] = [
    (CanonicalField::Price, "Preço", Unit::Plain),
    (CanonicalField::PeRatio, "P/L", Unit::Plain),
    (CanonicalField::MarketCap, "Valor de mercado", Unit::Plain),
    (CanonicalField::DividendYield, "Dividend Yield", Unit::Percent),
    (CanonicalField::Roe, "ROE", Unit::Percent),
];

/// Normalize a raw provider record onto the canonical schema
///
/// Returns the canonical fields that could be extracted; everything else is
/// dropped silently. Never fails as a whole.
pub fn normalize(raw: &RawFundamentalsRecord) -> BTreeMap<CanonicalField, NormalizedField> {
    let table: &[(CanonicalField, &str, Unit)] = match raw.provider {
        ProviderKind::Brapi => &BRAPI_FIELDS,
        ProviderKind::Investidor10 => &INVESTIDOR10_FIELDS,
    };

    let mut normalized = BTreeMap::new();

    for &(field, provider_name, unit) in table {
        let Some(value) = raw.get(provider_name) else {
            continue;
        };

        let Some(mut number) = to_number(value) else {
            debug!(
                provider = %raw.provider,
                field = %field,
                "dropping unparseable value {value:?}"
            );
            continue;
        };

        if unit == Unit::Percent {
            number /= 100.0;
        }

        if !number.is_finite() {
            continue;
        }

        normalized.insert(field, NormalizedField::new(field, number, raw.provider));
    }

    normalized
}

/// Interpret a raw value as a number
///
/// Text values are parsed with pt-BR locale rules, including magnitude
/// suffixes.
fn to_number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(s) => parse_magnitude_br(s),
    }
}

/// Parse a pt-BR formatted decimal: `R$ 1.234,56` → 1234.56
///
/// Currency symbols, percent signs and whitespace (including NBSP) are
/// stripped; `.` is a thousands separator and `,` the decimal mark.
pub fn parse_decimal_br(input: &str) -> Option<f64> {
    let cleaned = input
        .replace("R$", "")
        .replace(['%', ' ', '\u{a0}'], "")
        .replace('.', "")
        .replace(',', ".");

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok()
}

/// Parse a pt-BR amount with an optional magnitude suffix
///
/// Handles `122,12 Bilhões`, `45,3 M`, `1,2 Trilhão`, `350 Mil` and plain
/// decimals.
pub fn parse_magnitude_br(input: &str) -> Option<f64> {
    let lowered = input.replace("R$", "").trim().to_lowercase();

    for (name, multiplier) in [
        ("trilh", 1e12),
        ("bilh", 1e9),
        ("milh", 1e6),
        ("mil", 1e3),
    ] {
        if let Some(pos) = lowered.find(name) {
            return parse_decimal_br(&lowered[..pos]).map(|v| v * multiplier);
        }
    }

    for (suffix, multiplier) in [('t', 1e12), ('b', 1e9), ('m', 1e6), ('k', 1e3)] {
        if lowered.ends_with(suffix) {
            return parse_decimal_br(&lowered[..lowered.len() - 1]).map(|v| v * multiplier);
        }
    }

    parse_decimal_br(&lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_br() {
        assert_eq!(parse_decimal_br("R$ 36,75"), Some(36.75));
        assert_eq!(parse_decimal_br("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal_br("12,5%"), Some(12.5));
        assert_eq!(parse_decimal_br("-3,20"), Some(-3.2));
        assert_eq!(parse_decimal_br("n/a"), None);
        assert_eq!(parse_decimal_br(""), None);
    }

    #[test]
    fn test_parse_magnitude_br() {
        assert_eq!(parse_magnitude_br("R$ 122,12 Bilhões"), Some(122_120_000_000.0));
        assert_eq!(parse_magnitude_br("45,3 Milhões"), Some(45_300_000.0));
        assert_eq!(parse_magnitude_br("R$ 45,3 M"), Some(45_300_000.0));
        assert_eq!(parse_magnitude_br("1,2 Trilhão"), Some(1_200_000_000_000.0));
        assert_eq!(parse_magnitude_br("350 Mil"), Some(350_000.0));
        assert_eq!(parse_magnitude_br("36,75"), Some(36.75));
    }

    #[test]
    fn test_normalize_brapi_record() {
        let mut raw = RawFundamentalsRecord::new(ProviderKind::Brapi);
        raw.insert_number("regularMarketPrice", 21.31);
        raw.insert_number("marketCap", 122_124_000_000.0);
        raw.insert_number("dividendYield", 8.43);
        raw.insert_text("longName", "Banco do Brasil S.A.");

        let normalized = normalize(&raw);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[&CanonicalField::Price].value, 21.31);
        assert_eq!(
            normalized[&CanonicalField::Price].provider,
            ProviderKind::Brapi
        );
        // Percentage arrives as 8.43, stored as a fraction of one.
        assert!((normalized[&CanonicalField::DividendYield].value - 0.0843).abs() < 1e-12);
        // longName has no canonical counterpart and is dropped.
        assert!(!normalized.contains_key(&CanonicalField::Roe));
    }

    #[test]
    fn test_normalize_investidor10_record() {
        let mut raw = RawFundamentalsRecord::new(ProviderKind::Investidor10);
        raw.insert_text("Preço", "R$ 28,40");
        raw.insert_text("P/L", "5,65");
        raw.insert_text("Dividend Yield", "12,5%");
        raw.insert_text("ROE", "12,10%");
        raw.insert_text("Valor de mercado", "R$ 122,12 Bilhões");
        raw.insert_text("P/VP", "0,89");

        let normalized = normalize(&raw);

        assert_eq!(normalized.len(), 5);
        assert_eq!(normalized[&CanonicalField::Price].value, 28.40);
        assert_eq!(normalized[&CanonicalField::PeRatio].value, 5.65);
        assert!((normalized[&CanonicalField::DividendYield].value - 0.125).abs() < 1e-12);
        assert!((normalized[&CanonicalField::Roe].value - 0.121).abs() < 1e-12);
        assert_eq!(
            normalized[&CanonicalField::MarketCap].value,
            122_120_000_000.0
        );
        assert_eq!(
            normalized[&CanonicalField::MarketCap].provider,
            ProviderKind::Investidor10
        );
    }

    #[test]
    fn test_unparseable_field_is_omitted_not_fatal() {
        let mut raw = RawFundamentalsRecord::new(ProviderKind::Investidor10);
        raw.insert_text("Preço", "R$ 28,40");
        raw.insert_text("P/L", "indisponível");

        let normalized = normalize(&raw);

        assert_eq!(normalized.len(), 1);
        assert!(normalized.contains_key(&CanonicalField::Price));
        assert!(!normalized.contains_key(&CanonicalField::PeRatio));
    }

    #[test]
    fn test_empty_record_normalizes_to_empty_map() {
        let raw = RawFundamentalsRecord::new(ProviderKind::Brapi);
        assert!(normalize(&raw).is_empty());
    }
}
