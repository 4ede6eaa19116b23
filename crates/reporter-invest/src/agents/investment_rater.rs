//! Investment rater agent

use reporter_core::{Agent, Context, Result};
use reporter_runtime::{ReporterRuntime, SimpleConfig};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ReporterConfig;
use crate::prompts::system;

/// Agent that writes the final report and emits the single rating
pub struct InvestmentRaterAgent {
    agent: reporter_runtime::agents::SimpleAgent,
}

impl InvestmentRaterAgent {
    /// Create a new investment rater agent
    pub fn new(runtime: Arc<ReporterRuntime>, config: Arc<ReporterConfig>) -> Self {
        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: system::investment_rater().to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "investment-rater");

        Self { agent }
    }
}

#[async_trait]
impl Agent for InvestmentRaterAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "InvestmentRaterAgent"
    }
}
