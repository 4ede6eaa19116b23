//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use reporter_core::{Agent, Context, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface
/// while supporting tool execution in an LLM loop. The news researcher and
/// fundamentals analyst stages are ToolAgents.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    ///
    /// # Arguments
    ///
    /// * `executor` - The agent executor to wrap
    /// * `name` - Name of the agent
    pub fn new(executor: AgentExecutor, name: String) -> Self {
        Self { executor, name }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        // Delegate to the executor's run method
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
