//! LLM provider abstraction for the invest reporter
//!
//! Provider-agnostic types for talking to Large Language Models:
//!
//! - Message types for LLM communication (text, tool use, tool results)
//! - Completion request/response types
//! - Tool definitions for function calling
//! - `LlmProvider` trait for concrete backends
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LlmProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(any(feature = "anthropic", feature = "openai"))]
pub mod providers;
