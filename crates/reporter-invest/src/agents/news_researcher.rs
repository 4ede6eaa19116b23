//! News researcher agent

use reporter_core::{Agent, Context, Result};
use reporter_runtime::{ExecutorConfig, ReporterRuntime};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ReporterConfig;
use crate::prompts::system;
use crate::tools::NewsSearchTool;

/// Agent that gathers recent headlines via the news_search tool
pub struct NewsResearcherAgent {
    agent: reporter_runtime::agents::ToolAgent,
}

impl NewsResearcherAgent {
    /// Create a new news researcher agent
    pub fn new(
        runtime: Arc<ReporterRuntime>,
        config: Arc<ReporterConfig>,
    ) -> crate::error::Result<Self> {
        let news_tool = Arc::new(NewsSearchTool::new(Arc::clone(&config))?);
        runtime.tools().register(news_tool);

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(system::news_researcher().to_string()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 5,
        };

        let agent = runtime.create_tool_agent(executor_config, "news-researcher");

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for NewsResearcherAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "NewsResearcherAgent"
    }
}
