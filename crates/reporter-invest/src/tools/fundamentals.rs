//! Tool exposing the reconciliation engine to LLM agents

use reporter_core::Result as AgentResult;
use reporter_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::fundamentals::ReconciliationEngine;
use crate::ticker::TickerSymbol;

/// Tool that fetches the unified fundamentals record for a B3 ticker
///
/// The result always includes the `quality` flag, the `discrepancies` list
/// and any provider `errors`, so the analyst agent can qualify its language
/// instead of presenting degraded data as solid.
pub struct StockFundamentalsTool {
    engine: Arc<ReconciliationEngine>,
}

#[derive(Debug, Deserialize)]
struct FundamentalsParams {
    ticker: String,
}

impl StockFundamentalsTool {
    /// Create the tool around an engine
    pub fn new(engine: Arc<ReconciliationEngine>) -> Self {
        Self { engine }
    }

    async fn fetch_fundamentals(&self, params: FundamentalsParams) -> crate::error::Result<Value> {
        // Validation happens before any fetch is dispatched.
        let ticker = TickerSymbol::parse(&params.ticker)?;
        let record = self.engine.unified_fundamentals(&ticker).await;
        Ok(record.to_report_json())
    }
}

#[async_trait]
impl Tool for StockFundamentalsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: FundamentalsParams = serde_json::from_value(params).map_err(|e| {
            reporter_core::Error::ProcessingFailed(format!("Invalid parameters: {}", e))
        })?;

        self.fetch_fundamentals(params)
            .await
            .map_err(|e| reporter_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "stock_fundamentals"
    }

    fn description(&self) -> &str {
        "Fetch fundamentals for a B3 stock ticker, reconciled from two independent \
         sources (the brapi quote API and the Investidor10 fundamentals page). \
         Returns the merged metrics with per-field provenance, a list of \
         discrepancies where the sources disagree, any fetch errors, and an \
         overall quality flag (ok, partial, degraded)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "B3 ticker symbol, e.g. PETR4 or PETR4.SA"
                }
            },
            "required": ["ticker"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fundamentals::provider::MockFundamentalsProvider;
    use crate::fundamentals::{ProviderKind, ReconcilePolicy};
    use std::time::Duration;

    fn failing_engine() -> Arc<ReconciliationEngine> {
        let mut a = MockFundamentalsProvider::new();
        a.expect_kind().return_const(ProviderKind::Brapi);
        a.expect_fetch()
            .returning(|_| Err(FetchError::transport(ProviderKind::Brapi, "offline")));

        let mut b = MockFundamentalsProvider::new();
        b.expect_kind().return_const(ProviderKind::Investidor10);
        b.expect_fetch()
            .returning(|_| Err(FetchError::transport(ProviderKind::Investidor10, "offline")));

        Arc::new(ReconciliationEngine::with_providers(
            Arc::new(a),
            Arc::new(b),
            ReconcilePolicy::default(),
            Duration::from_millis(100),
            false,
        ))
    }

    #[tokio::test]
    async fn test_invalid_ticker_rejected_before_fetch() {
        let tool = StockFundamentalsTool::new(failing_engine());
        let result = tool.execute(json!({"ticker": "not-a-ticker"})).await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid ticker"));
    }

    #[tokio::test]
    async fn test_degraded_record_is_still_a_result() {
        // Total source failure must yield data, not an error - the report
        // pipeline continues with caveats.
        let tool = StockFundamentalsTool::new(failing_engine());
        let result = tool.execute(json!({"ticker": "PETR4"})).await.unwrap();

        assert_eq!(result["quality"], "degraded");
        assert_eq!(result["errors"].as_array().unwrap().len(), 2);
        assert!(result["fundamentals"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = StockFundamentalsTool::new(failing_engine());
        assert_eq!(tool.name(), "stock_fundamentals");
        assert!(tool.description().contains("quality"));
        assert_eq!(tool.input_schema()["required"][0], "ticker");
    }
}
