//! Sequential task pipeline for the invest reporter
//!
//! Models the report generation flow as a list of named tasks executed in
//! order. Every task is handled by one agent; each task sees the outputs of
//! all tasks before it, and a task can persist its output to a file (the
//! final investment report).

pub mod task;
pub mod workflow;

// Re-export for convenience
pub use task::{Task, TaskOutput};
pub use workflow::{Workflow, WorkflowBuilder, WorkflowRun};
