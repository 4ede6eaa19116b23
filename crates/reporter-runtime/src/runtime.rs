//! Runtime for executing agents with dependency injection
//!
//! The ReporterRuntime manages shared resources (LLM provider and tool
//! registry) and provides factory methods for creating the agent flavors the
//! report pipeline uses.

use reporter_core::Result;
use reporter_llm::LlmProvider;
use reporter_tools::ToolRegistry;
use std::sync::Arc;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "claude-sonnet-4-5-20250929".to_string(),
        }
    }
}

/// Runtime for executing agents with dependency injection
///
/// # Example
///
/// ```no_run
/// use reporter_runtime::{ReporterRuntime, SimpleConfig, ExecutorConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> reporter_core::Result<()> {
/// # let provider: Arc<dyn reporter_llm::LlmProvider> = unimplemented!();
/// let runtime = ReporterRuntime::builder()
///     .provider(provider)
///     .build()?;
///
/// // An agent without tools
/// let synthesizer = runtime.create_simple_agent(SimpleConfig::default(), "news-synthesizer");
///
/// // An agent that runs the tool loop
/// let researcher = runtime.create_tool_agent(ExecutorConfig::default(), "news-researcher");
/// # Ok(())
/// # }
/// ```
pub struct ReporterRuntime {
    provider: Arc<dyn LlmProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl ReporterRuntime {
    /// Create a new agent runtime
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> ReporterRuntimeBuilder {
        ReporterRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create a simple agent (LLM only, no tools)
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the simple agent
    /// * `name` - Name of the agent
    pub fn create_simple_agent(
        &self,
        config: SimpleConfig,
        name: impl Into<String>,
    ) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// Create a tool-using agent (with LLM loop and tool execution)
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the executor
    /// * `name` - Name of the agent
    pub fn create_tool_agent(&self, config: ExecutorConfig, name: impl Into<String>) -> ToolAgent {
        let executor =
            AgentExecutor::new(self.provider.clone(), self.tool_registry.clone(), config);
        ToolAgent::new(executor, name.into())
    }
}

/// Builder for ReporterRuntime
pub struct ReporterRuntimeBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: RuntimeConfig,
}

impl ReporterRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<ReporterRuntime> {
        let provider = self.provider.ok_or_else(|| {
            reporter_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(ReporterRuntime::new(provider, tool_registry, self.config))
    }
}

impl Default for ReporterRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
