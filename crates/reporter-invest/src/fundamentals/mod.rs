//! Multi-source fundamentals reconciliation
//!
//! The core of the crate: two provider adapters fetch overlapping but
//! non-identical fundamentals, the normalizer maps both onto one canonical
//! schema, and the reconciler merges them field by field into a single
//! unified record with per-field provenance, surfaced discrepancies, and an
//! overall quality flag. Reconciliation is total: it always produces a
//! record, with failures embedded as data.

pub mod engine;
pub mod normalize;
pub mod provider;
pub mod reconcile;
pub mod record;
pub mod schema;

pub use engine::ReconciliationEngine;
pub use normalize::normalize;
pub use provider::{FundamentalsProvider, RawFundamentalsRecord, RawValue};
pub use reconcile::{ReconcilePolicy, reconcile};
pub use record::{DataQuality, FieldDiscrepancy, NormalizedField, UnifiedFundamentalsRecord};
pub use schema::{CanonicalField, FieldClass, ProviderKind};
