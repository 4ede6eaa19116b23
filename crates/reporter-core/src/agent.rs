//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait implemented by every stage of the report pipeline
///
/// An agent consumes a textual task description and produces textual output.
/// The input/output types are intentionally kept as String for maximum
/// flexibility; concrete implementations parse/format as needed. Structured
/// data (the unified fundamentals record, headline lists) travels through
/// tool results and the run `Context`, not through this signature.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// Initialize the agent (optional)
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Shutdown the agent (optional)
    async fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
