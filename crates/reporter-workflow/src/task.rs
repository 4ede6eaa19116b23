//! Task definition for the report pipeline

use reporter_core::Agent;
use std::path::PathBuf;
use std::sync::Arc;

/// A named unit of work executed by one agent
///
/// The task description is the prompt handed to the agent; `expected_output`
/// is appended to it so the agent knows what shape of answer the next task
/// depends on. When `output_file` is set, the workflow persists the task's
/// output there after completion.
#[derive(Clone)]
pub struct Task {
    /// Task name, used as the context key for downstream tasks
    pub name: String,

    /// The prompt describing what the agent should do
    pub description: String,

    /// What the task's output should look like (appended to the prompt)
    pub expected_output: Option<String>,

    /// The agent that executes this task
    pub agent: Arc<dyn Agent>,

    /// File the task output is written to after completion
    pub output_file: Option<PathBuf>,
}

impl Task {
    /// Create a new task
    ///
    /// # Arguments
    ///
    /// * `name` - Task name (unique within a workflow)
    /// * `agent` - The agent that executes it
    /// * `description` - The prompt describing the work
    pub fn new(
        name: impl Into<String>,
        agent: Arc<dyn Agent>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: None,
            agent,
            output_file: None,
        }
    }

    /// Describe the expected output shape
    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    /// Persist the task output to a file after completion
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Render the full prompt for this task, including accumulated context
    /// from previously completed tasks
    pub(crate) fn render_input(&self, prior_outputs: &[(&str, &str)]) -> String {
        let mut input = self.description.clone();

        if let Some(expected) = &self.expected_output {
            input.push_str("\n\nExpected output:\n");
            input.push_str(expected);
        }

        if !prior_outputs.is_empty() {
            input.push_str("\n\n## Context from previous tasks\n");
            for (name, output) in prior_outputs {
                input.push_str(&format!("\n### {name}\n{output}\n"));
            }
        }

        input
    }
}

/// The recorded result of one completed task
#[derive(Debug, Clone)]
pub struct TaskOutput {
    /// Task name
    pub name: String,

    /// The agent's output
    pub output: String,

    /// Where the output was persisted, if anywhere
    pub output_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reporter_core::{Context, Result};

    struct NullAgent;

    #[async_trait]
    impl Agent for NullAgent {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_render_input_without_context() {
        let task = Task::new("news_collection", Arc::new(NullAgent), "Collect headlines")
            .with_expected_output("A bullet list");

        let input = task.render_input(&[]);
        assert!(input.starts_with("Collect headlines"));
        assert!(input.contains("Expected output:\nA bullet list"));
        assert!(!input.contains("Context from previous tasks"));
    }

    #[test]
    fn test_render_input_appends_prior_outputs_in_order() {
        let task = Task::new("investment_rating", Arc::new(NullAgent), "Rate the stock");

        let input = task.render_input(&[
            ("news_synthesis", "Sentiment is mixed"),
            ("fundamentals", "P/E 5.6"),
        ]);

        let synth_pos = input.find("### news_synthesis").unwrap();
        let fund_pos = input.find("### fundamentals").unwrap();
        assert!(synth_pos < fund_pos);
        assert!(input.contains("Sentiment is mixed"));
    }
}
