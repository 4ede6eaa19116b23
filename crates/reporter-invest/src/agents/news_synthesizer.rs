//! News synthesizer agent

use reporter_core::{Agent, Context, Result};
use reporter_runtime::{ReporterRuntime, SimpleConfig};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ReporterConfig;
use crate::prompts::system;

/// Agent that condenses collected headlines into a briefing
///
/// Pure text transformation; no tools.
pub struct NewsSynthesizerAgent {
    agent: reporter_runtime::agents::SimpleAgent,
}

impl NewsSynthesizerAgent {
    /// Create a new news synthesizer agent
    pub fn new(runtime: Arc<ReporterRuntime>, config: Arc<ReporterConfig>) -> Self {
        let simple_config = SimpleConfig {
            model: config.model.clone(),
            system_prompt: system::news_synthesizer().to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let agent = runtime.create_simple_agent(simple_config, "news-synthesizer");

        Self { agent }
    }
}

#[async_trait]
impl Agent for NewsSynthesizerAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "NewsSynthesizerAgent"
    }
}
