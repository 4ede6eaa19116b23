//! Agent runtime for the invest reporter
//!
//! Provides the runtime infrastructure for executing report agents: the
//! `AgentExecutor` LLM ⇄ tool loop, the `ReporterRuntime` dependency
//! container, and the concrete `SimpleAgent`/`ToolAgent` implementations.

pub mod agents;
pub mod executor;
pub mod runtime;

// Re-export key types
pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use runtime::{ReporterRuntime, ReporterRuntimeBuilder, RuntimeConfig};
