//! Fundamentals analyst agent

use reporter_core::{Agent, Context, Result};
use reporter_runtime::{ExecutorConfig, ReporterRuntime};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ReporterConfig;
use crate::fundamentals::ReconciliationEngine;
use crate::prompts::system;
use crate::tools::StockFundamentalsTool;

/// Agent that fetches and interprets the reconciled fundamentals
pub struct FundamentalsAnalystAgent {
    agent: reporter_runtime::agents::ToolAgent,
}

impl FundamentalsAnalystAgent {
    /// Create a new fundamentals analyst agent
    ///
    /// Builds a fresh reconciliation engine; no state is shared with other
    /// runs.
    pub fn new(
        runtime: Arc<ReporterRuntime>,
        config: Arc<ReporterConfig>,
    ) -> crate::error::Result<Self> {
        let engine = Arc::new(ReconciliationEngine::new(&config)?);
        let fundamentals_tool = Arc::new(StockFundamentalsTool::new(engine));
        runtime.tools().register(fundamentals_tool);

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(system::fundamentals_analyst().to_string()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 5,
        };

        let agent = runtime.create_tool_agent(executor_config, "fundamentals-analyst");

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for FundamentalsAnalystAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "FundamentalsAnalystAgent"
    }
}
