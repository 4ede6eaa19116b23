//! Field-by-field reconciliation of the two normalized provider views
//!
//! Pure and synchronous: no I/O, no clocks, no randomness. Identical inputs
//! produce identical records. The operation is total - it always returns a
//! record, embedding provider failures and disagreements as data instead of
//! failing.

use crate::error::FetchError;
use crate::fundamentals::record::{
    DataQuality, FieldDiscrepancy, NormalizedField, UnifiedFundamentalsRecord,
};
use crate::fundamentals::schema::{CanonicalField, ProviderKind};
use crate::ticker::TickerSymbol;
use std::collections::BTreeMap;
use tracing::debug;

/// The conflict-resolution policy, as data
///
/// Keeping the thresholds here makes the merge rules testable in isolation
/// and keeps magic numbers out of the algorithm.
#[derive(Debug, Clone)]
pub struct ReconcilePolicy {
    /// Relative difference above which a shared field is a discrepancy
    pub tolerance: f64,
    /// Floor for the denominator of the relative difference
    pub epsilon: f64,
    /// Records with fewer canonical fields than this are degraded
    pub min_viable_fields: usize,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            epsilon: 1e-9,
            min_viable_fields: 3,
        }
    }
}

impl ReconcilePolicy {
    /// `|a-b| / max(|a|, |b|, epsilon)`
    pub fn relative_difference(&self, a: f64, b: f64) -> f64 {
        let denominator = a.abs().max(b.abs()).max(self.epsilon);
        (a - b).abs() / denominator
    }

    /// Whether two reported values disagree materially
    ///
    /// Any sign mismatch counts, regardless of magnitude.
    pub fn is_discrepant(&self, a: f64, b: f64) -> bool {
        if a * b < 0.0 {
            return true;
        }
        self.relative_difference(a, b) > self.tolerance
    }
}

/// Merge two normalized provider views into one unified record
///
/// # Arguments
///
/// * `ticker` - The ticker both views describe
/// * `normalized_a` - brapi's view (provider A)
/// * `normalized_b` - Investidor10's view (provider B)
/// * `error_a` / `error_b` - provider-level fetch failures, if any
/// * `policy` - tolerance and viability thresholds
///
/// Per field: a value reported by only one provider is taken as-is; a value
/// reported by both is chosen by the fixed per-class precedence, and a
/// `FieldDiscrepancy` is additionally recorded when the values disagree
/// materially. Fields reported by neither are absent, never defaulted.
pub fn reconcile(
    ticker: &TickerSymbol,
    normalized_a: &BTreeMap<CanonicalField, NormalizedField>,
    normalized_b: &BTreeMap<CanonicalField, NormalizedField>,
    error_a: Option<FetchError>,
    error_b: Option<FetchError>,
    policy: &ReconcilePolicy,
) -> UnifiedFundamentalsRecord {
    let mut fields = BTreeMap::new();
    let mut discrepancies = Vec::new();

    for field in CanonicalField::ALL {
        match (normalized_a.get(&field), normalized_b.get(&field)) {
            (None, None) => {}
            (Some(a), None) => {
                fields.insert(field, a.clone());
            }
            (None, Some(b)) => {
                fields.insert(field, b.clone());
            }
            (Some(a), Some(b)) => {
                let chosen = match field.primary_provider() {
                    ProviderKind::Brapi => a,
                    ProviderKind::Investidor10 => b,
                };

                if policy.is_discrepant(a.value, b.value) {
                    let relative_difference = policy.relative_difference(a.value, b.value);
                    debug!(
                        ticker = %ticker,
                        field = %field,
                        a = a.value,
                        b = b.value,
                        relative_difference,
                        "providers disagree; keeping {} value",
                        chosen.provider
                    );
                    discrepancies.push(FieldDiscrepancy {
                        field,
                        brapi: a.value,
                        investidor10: b.value,
                        relative_difference,
                    });
                }

                fields.insert(field, chosen.clone());
            }
        }
    }

    let errors: Vec<FetchError> = [error_a, error_b].into_iter().flatten().collect();

    let quality = derive_quality(&fields, &discrepancies, &errors, policy);

    UnifiedFundamentalsRecord {
        ticker: ticker.clone(),
        fields,
        discrepancies,
        errors,
        quality,
    }
}

/// Derive the overall quality flag
fn derive_quality(
    fields: &BTreeMap<CanonicalField, NormalizedField>,
    discrepancies: &[FieldDiscrepancy],
    errors: &[FetchError],
    policy: &ReconcilePolicy,
) -> DataQuality {
    if errors.len() >= 2 || fields.len() < policy.min_viable_fields {
        return DataQuality::Degraded;
    }

    if !errors.is_empty() || !discrepancies.is_empty() {
        return DataQuality::Partial;
    }

    DataQuality::Ok
}
