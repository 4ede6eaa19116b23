//! Tool framework for the invest reporter
//!
//! Tools are functions that LLM agents can call during the report pipeline
//! (headline search, fundamentals fetch). This crate defines the `Tool`
//! trait and the registry the runtime resolves tool calls against.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
