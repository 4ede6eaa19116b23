//! Simple agent implementation (LLM only, no tools)

use reporter_core::{Agent, Context, Result};
use reporter_llm::{CompletionRequest, LlmProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// A simple agent that uses LLM without tools
///
/// Suitable for the pipeline stages that only transform text: the news
/// synthesizer and the investment rater.
pub struct SimpleAgent {
    provider: Arc<dyn LlmProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    ///
    /// # Arguments
    ///
    /// * `provider` - The LLM provider to use
    /// * `config` - Configuration for the agent
    /// * `name` - Name of the agent
    pub fn new(provider: Arc<dyn LlmProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
        }
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        // Build completion request
        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        // Call LLM
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| reporter_core::Error::ProcessingFailed(e.to_string()))?;

        // Extract text from response
        Ok(response.message.text().unwrap_or("No response").to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reporter_llm::{CompletionResponse, StopReason, TokenUsage};

    struct UpperProvider;

    #[async_trait]
    impl LlmProvider for UpperProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> reporter_llm::Result<CompletionResponse> {
            let text = request.messages[0].text().unwrap_or_default().to_uppercase();
            Ok(CompletionResponse {
                message: Message::assistant(text),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 1,
                    output_tokens: 1,
                },
            })
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.7);
    }

    #[tokio::test]
    async fn test_simple_agent_round_trip() {
        let agent = SimpleAgent::new(
            Arc::new(UpperProvider),
            SimpleConfig::default(),
            "echo".to_string(),
        );

        let mut ctx = Context::new();
        let out = agent.process("rate petr4".to_string(), &mut ctx).await.unwrap();
        assert_eq!(out, "RATE PETR4");
    }
}
