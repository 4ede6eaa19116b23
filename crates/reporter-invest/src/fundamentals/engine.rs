//! The reconciliation engine: bounded concurrent fetch, normalize, merge
//!
//! The engine owns the two provider adapters and the merge policy. Its one
//! operation is total: whatever the providers do - answer, hang, or fail -
//! the caller gets a unified record with the failure story embedded in it.

use crate::config::ReporterConfig;
use crate::error::{FetchError, FetchErrorKind, Result};
use crate::fundamentals::normalize::normalize;
use crate::fundamentals::provider::{FundamentalsProvider, RawFundamentalsRecord};
use crate::fundamentals::reconcile::{ReconcilePolicy, reconcile};
use crate::fundamentals::record::{NormalizedField, UnifiedFundamentalsRecord};
use crate::fundamentals::schema::CanonicalField;
use crate::ticker::TickerSymbol;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Merges fundamentals from both providers into one unified record
///
/// The two fetches have no data dependency on each other and run
/// concurrently; each attempt is bounded by an independent timeout, and a
/// transport failure is retried at most once, so total wall clock is
/// deterministically bounded. No state survives between calls.
pub struct ReconciliationEngine {
    provider_a: Arc<dyn FundamentalsProvider>,
    provider_b: Arc<dyn FundamentalsProvider>,
    policy: ReconcilePolicy,
    fetch_timeout: Duration,
    retry_transport: bool,
}

impl ReconciliationEngine {
    /// Build the engine with the real adapters from configuration
    pub fn new(config: &ReporterConfig) -> Result<Self> {
        let brapi = crate::api::BrapiClient::new(config.brapi_token.clone())?;
        let investidor10 = crate::api::Investidor10Client::new()?;

        Ok(Self::with_providers(
            Arc::new(brapi),
            Arc::new(investidor10),
            config.reconcile_policy(),
            config.fetch_timeout,
            config.retry_transport,
        ))
    }

    /// Build the engine with explicit providers (used by tests)
    pub fn with_providers(
        provider_a: Arc<dyn FundamentalsProvider>,
        provider_b: Arc<dyn FundamentalsProvider>,
        policy: ReconcilePolicy,
        fetch_timeout: Duration,
        retry_transport: bool,
    ) -> Self {
        Self {
            provider_a,
            provider_b,
            policy,
            fetch_timeout,
            retry_transport,
        }
    }

    /// Fetch, normalize and reconcile fundamentals for a ticker
    ///
    /// Never fails: provider errors are folded into the returned record's
    /// `errors` list and `quality` flag.
    pub async fn unified_fundamentals(&self, ticker: &TickerSymbol) -> UnifiedFundamentalsRecord {
        info!("Reconciling fundamentals for {ticker}");

        let (result_a, result_b) = futures::join!(
            self.fetch_bounded(self.provider_a.as_ref(), ticker),
            self.fetch_bounded(self.provider_b.as_ref(), ticker),
        );

        let (normalized_a, error_a) = split_fetch(result_a);
        let (normalized_b, error_b) = split_fetch(result_b);

        let record = reconcile(
            ticker,
            &normalized_a,
            &normalized_b,
            error_a,
            error_b,
            &self.policy,
        );

        info!(
            "Reconciled {ticker}: {} fields, {} discrepancies, quality {}",
            record.fields.len(),
            record.discrepancies.len(),
            record.quality
        );

        record
    }

    /// One fetch with timeout, plus a single retry for transport failures
    async fn fetch_bounded(
        &self,
        provider: &dyn FundamentalsProvider,
        ticker: &TickerSymbol,
    ) -> std::result::Result<RawFundamentalsRecord, FetchError> {
        let first = self.fetch_once(provider, ticker).await;

        match first {
            Err(err) if err.kind == FetchErrorKind::Transport && self.retry_transport => {
                warn!("{} fetch failed ({}), retrying once", provider.kind(), err.message);
                self.fetch_once(provider, ticker).await
            }
            other => other,
        }
    }

    /// One fetch attempt bounded by the configured timeout
    ///
    /// A timeout is indistinguishable from any other transport failure to
    /// everything downstream.
    async fn fetch_once(
        &self,
        provider: &dyn FundamentalsProvider,
        ticker: &TickerSymbol,
    ) -> std::result::Result<RawFundamentalsRecord, FetchError> {
        match tokio::time::timeout(self.fetch_timeout, provider.fetch(ticker)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::transport(
                provider.kind(),
                format!("timed out after {:?}", self.fetch_timeout),
            )),
        }
    }
}

/// Split a fetch outcome into a normalized view and an optional error
fn split_fetch(
    result: std::result::Result<RawFundamentalsRecord, FetchError>,
) -> (BTreeMap<CanonicalField, NormalizedField>, Option<FetchError>) {
    match result {
        Ok(raw) => {
            debug!(
                "{} returned {} raw fields",
                raw.provider,
                raw.len()
            );
            (normalize(&raw), None)
        }
        Err(err) => {
            warn!("{err}");
            (BTreeMap::new(), Some(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fundamentals::provider::MockFundamentalsProvider;
    use crate::fundamentals::record::DataQuality;
    use crate::fundamentals::schema::ProviderKind;

    fn ticker() -> TickerSymbol {
        TickerSymbol::parse("BBAS3").unwrap()
    }

    fn engine_with(
        a: MockFundamentalsProvider,
        b: MockFundamentalsProvider,
    ) -> ReconciliationEngine {
        ReconciliationEngine::with_providers(
            Arc::new(a),
            Arc::new(b),
            ReconcilePolicy::default(),
            Duration::from_millis(200),
            false,
        )
    }

    fn brapi_mock_returning(fields: Vec<(&'static str, f64)>) -> MockFundamentalsProvider {
        let mut mock = MockFundamentalsProvider::new();
        mock.expect_kind().return_const(ProviderKind::Brapi);
        mock.expect_fetch().returning(move |_| {
            let mut raw = RawFundamentalsRecord::new(ProviderKind::Brapi);
            for (name, value) in &fields {
                raw.insert_number(*name, *value);
            }
            Ok(raw)
        });
        mock
    }

    fn investidor10_mock_returning(
        fields: Vec<(&'static str, &'static str)>,
    ) -> MockFundamentalsProvider {
        let mut mock = MockFundamentalsProvider::new();
        mock.expect_kind().return_const(ProviderKind::Investidor10);
        mock.expect_fetch().returning(move |_| {
            let mut raw = RawFundamentalsRecord::new(ProviderKind::Investidor10);
            for (name, value) in &fields {
                raw.insert_text(*name, *value);
            }
            Ok(raw)
        });
        mock
    }

    fn failing_mock(kind: ProviderKind, error: FetchError) -> MockFundamentalsProvider {
        let mut mock = MockFundamentalsProvider::new();
        mock.expect_kind().return_const(kind);
        mock.expect_fetch().returning(move |_| Err(error.clone()));
        mock
    }

    #[tokio::test]
    async fn test_end_to_end_merge_with_no_overlap() {
        let a = brapi_mock_returning(vec![
            ("regularMarketPrice", 21.31),
            ("marketCap", 122_124_000_000.0),
        ]);
        let b = investidor10_mock_returning(vec![("P/L", "5,65"), ("ROE", "12,10%")]);

        let record = engine_with(a, b).unified_fundamentals(&ticker()).await;

        assert_eq!(record.fields.len(), 4);
        assert_eq!(record.quality, DataQuality::Ok);
        assert!(record.discrepancies.is_empty());
        assert_eq!(
            record.provenance(CanonicalField::Price),
            Some(ProviderKind::Brapi)
        );
        assert_eq!(
            record.provenance(CanonicalField::Roe),
            Some(ProviderKind::Investidor10)
        );
        assert!((record.value(CanonicalField::Roe).unwrap() - 0.121).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_both_providers_failing_yields_degraded_record() {
        let a = failing_mock(
            ProviderKind::Brapi,
            FetchError::transport(ProviderKind::Brapi, "dns failure"),
        );
        let b = failing_mock(
            ProviderKind::Investidor10,
            FetchError::rate_limited(ProviderKind::Investidor10, "429"),
        );

        let record = engine_with(a, b).unified_fundamentals(&ticker()).await;

        assert_eq!(record.quality, DataQuality::Degraded);
        assert!(record.fields.is_empty());
        assert_eq!(record.errors.len(), 2);
    }

    /// Provider that never answers within any reasonable timeout
    struct HangingProvider;

    #[async_trait::async_trait]
    impl FundamentalsProvider for HangingProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Brapi
        }

        async fn fetch(
            &self,
            _ticker: &TickerSymbol,
        ) -> std::result::Result<RawFundamentalsRecord, FetchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(RawFundamentalsRecord::new(ProviderKind::Brapi))
        }
    }

    #[tokio::test]
    async fn test_hanging_provider_becomes_transport_error() {
        let b = investidor10_mock_returning(vec![
            ("Preço", "R$ 28,40"),
            ("P/L", "5,65"),
            ("ROE", "12,10%"),
        ]);

        let engine = ReconciliationEngine::with_providers(
            Arc::new(HangingProvider),
            Arc::new(b),
            ReconcilePolicy::default(),
            Duration::from_millis(200),
            false,
        );

        let record = engine.unified_fundamentals(&ticker()).await;

        assert_eq!(record.errors.len(), 1);
        assert_eq!(record.errors[0].kind, FetchErrorKind::Transport);
        assert!(record.errors[0].message.contains("timed out"));
        assert_eq!(record.quality, DataQuality::Partial);
    }

    #[tokio::test]
    async fn test_transport_failure_retried_once() {
        let mut flaky = MockFundamentalsProvider::new();
        flaky.expect_kind().return_const(ProviderKind::Brapi);
        let mut calls = 0;
        flaky.expect_fetch().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(FetchError::transport(ProviderKind::Brapi, "reset"))
            } else {
                let mut raw = RawFundamentalsRecord::new(ProviderKind::Brapi);
                raw.insert_number("regularMarketPrice", 21.31);
                raw.insert_number("marketCap", 1.0e9);
                raw.insert_number("averageDailyVolume3Month", 1.0e7);
                Ok(raw)
            }
        });

        let b = failing_mock(
            ProviderKind::Investidor10,
            FetchError::not_found(ProviderKind::Investidor10, "404"),
        );

        let engine = ReconciliationEngine::with_providers(
            Arc::new(flaky),
            Arc::new(b),
            ReconcilePolicy::default(),
            Duration::from_millis(200),
            true,
        );

        let record = engine.unified_fundamentals(&ticker()).await;

        assert_eq!(record.value(CanonicalField::Price), Some(21.31));
        // Only the not-found error remains; the transport failure recovered.
        assert_eq!(record.errors.len(), 1);
        assert_eq!(record.errors[0].kind, FetchErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let mut once = MockFundamentalsProvider::new();
        once.expect_kind().return_const(ProviderKind::Brapi);
        once.expect_fetch()
            .times(1)
            .returning(|_| Err(FetchError::not_found(ProviderKind::Brapi, "no results")));

        let b = investidor10_mock_returning(vec![
            ("Preço", "R$ 28,40"),
            ("P/L", "5,65"),
            ("ROE", "12,10%"),
        ]);

        let engine = ReconciliationEngine::with_providers(
            Arc::new(once),
            Arc::new(b),
            ReconcilePolicy::default(),
            Duration::from_millis(200),
            true,
        );

        let record = engine.unified_fundamentals(&ticker()).await;
        assert_eq!(record.errors.len(), 1);
        assert_eq!(record.errors[0].kind, FetchErrorKind::NotFound);
    }
}
