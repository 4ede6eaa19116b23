//! Execution context for a single report run
//!
//! The `Context` struct carries run-scoped state through the pipeline: which
//! ticker is being reported on, the reference year, and the output of every
//! task that has already completed. Later tasks read earlier outputs from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Uppercase ticker symbol the run is about (e.g. "PETR4")
    pub const TICKER: &str = "ticker";
    /// Reference year interpolated into prompts (e.g. "2026")
    pub const CURRENT_YEAR: &str = "current_year";
    /// Prefix under which completed task outputs are stored
    pub const TASK_OUTPUT_PREFIX: &str = "task_output:";
}

/// Context passed to agents during a report run
///
/// # Example
///
/// ```
/// use reporter_core::Context;
///
/// let mut ctx = Context::new()
///     .with_ticker("PETR4")
///     .with_current_year("2026");
///
/// ctx.record_task_output("news_collection", "10 headlines found");
/// assert_eq!(ctx.ticker(), Some("PETR4"));
/// assert_eq!(ctx.task_output("news_collection"), Some("10 headlines found"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Key-value storage for run data
    data: HashMap<String, serde_json::Value>,
    /// Task names in completion order, so context rendering is deterministic
    completed_tasks: Vec<String>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    // =========== Builder Methods ===========

    /// Set the ticker symbol for this run
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.insert(keys::TICKER, serde_json::json!(ticker.into()));
        self
    }

    /// Set the reference year for this run
    pub fn with_current_year(mut self, year: impl Into<String>) -> Self {
        self.insert(keys::CURRENT_YEAR, serde_json::json!(year.into()));
        self
    }

    // =========== Run Accessors ===========

    /// Get the ticker symbol for this run
    pub fn ticker(&self) -> Option<&str> {
        self.get(keys::TICKER).and_then(|v| v.as_str())
    }

    /// Get the reference year for this run
    pub fn current_year(&self) -> Option<&str> {
        self.get(keys::CURRENT_YEAR).and_then(|v| v.as_str())
    }

    /// Record the output of a completed task
    pub fn record_task_output(&mut self, task: impl Into<String>, output: impl Into<String>) {
        let task = task.into();
        let key = format!("{}{task}", keys::TASK_OUTPUT_PREFIX);
        if !self.data.contains_key(&key) {
            self.completed_tasks.push(task);
        }
        self.insert(key, serde_json::json!(output.into()));
    }

    /// Get the output of a previously completed task
    pub fn task_output(&self, task: &str) -> Option<&str> {
        self.get(&format!("{}{task}", keys::TASK_OUTPUT_PREFIX))
            .and_then(|v| v.as_str())
    }

    /// Names of completed tasks, in completion order
    pub fn completed_tasks(&self) -> &[String] {
        &self.completed_tasks
    }

    /// All completed task outputs in completion order as `(name, output)`
    ///
    /// This is what sequential pipelines hand to the next task as context.
    pub fn task_outputs(&self) -> Vec<(&str, &str)> {
        self.completed_tasks
            .iter()
            .filter_map(|name| self.task_output(name).map(|out| (name.as_str(), out)))
            .collect()
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    ///
    /// Serializes the value to JSON before storing.
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    ///
    /// Deserializes the JSON value into the specified type.
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: i32,
        text: String,
    }

    #[test]
    fn test_basic_operations() {
        let mut ctx = Context::new();
        assert!(ctx.is_empty());

        ctx.insert("key", serde_json::json!("value"));
        assert_eq!(ctx.len(), 1);
        assert!(ctx.contains_key("key"));
        assert_eq!(ctx.get("key"), Some(&serde_json::json!("value")));
    }

    #[test]
    fn test_builder_chain() {
        let ctx = Context::new().with_ticker("BBAS3").with_current_year("2026");

        assert_eq!(ctx.ticker(), Some("BBAS3"));
        assert_eq!(ctx.current_year(), Some("2026"));
    }

    #[test]
    fn test_typed_insert_get() {
        let mut ctx = Context::new();
        let data = TestData {
            value: 42,
            text: "hello".to_string(),
        };

        ctx.insert_typed("test", &data).unwrap();

        let retrieved: TestData = ctx.get_typed("test").unwrap().unwrap();
        assert_eq!(retrieved, data);
    }

    #[test]
    fn test_task_outputs_keep_completion_order() {
        let mut ctx = Context::new();
        ctx.record_task_output("news_collection", "headlines");
        ctx.record_task_output("news_synthesis", "summary");

        assert_eq!(ctx.task_output("news_collection"), Some("headlines"));
        assert_eq!(
            ctx.task_outputs(),
            vec![("news_collection", "headlines"), ("news_synthesis", "summary")]
        );
    }

    #[test]
    fn test_task_output_overwrite_keeps_single_entry() {
        let mut ctx = Context::new();
        ctx.record_task_output("fundamentals", "first");
        ctx.record_task_output("fundamentals", "second");

        assert_eq!(ctx.task_output("fundamentals"), Some("second"));
        assert_eq!(ctx.completed_tasks(), &["fundamentals".to_string()]);
    }

    #[test]
    fn test_get_typed_missing_key() {
        let ctx = Context::new();
        let result: crate::Result<Option<TestData>> = ctx.get_typed("missing");
        assert!(result.unwrap().is_none());
    }
}
