//! Workflow definition and sequential execution

use crate::task::{Task, TaskOutput};
use reporter_core::{Context, Error, Result};
use tracing::{debug, info};

/// A workflow that coordinates tasks sequentially
///
/// Tasks run in the order they were added. Each task receives its own prompt
/// plus the outputs of every task that ran before it; the output of each task
/// is recorded in the run `Context` under the task's name. A task with an
/// `output_file` has its output persisted after it completes.
///
/// # Example
///
/// ```no_run
/// use reporter_workflow::{Task, Workflow};
/// use reporter_core::Context;
/// use std::sync::Arc;
///
/// # async fn example(researcher: Arc<dyn reporter_core::Agent>,
/// #                  rater: Arc<dyn reporter_core::Agent>) -> reporter_core::Result<()> {
/// let workflow = Workflow::builder()
///     .add_task(Task::new("news_collection", researcher, "Collect headlines for PETR4"))
///     .add_task(
///         Task::new("investment_rating", rater, "Rate PETR4")
///             .with_output_file("reports/PETR4_investment_report.md"),
///     )
///     .build()?;
///
/// let mut context = Context::new().with_ticker("PETR4");
/// let run = workflow.execute(&mut context).await?;
/// println!("{}", run.final_output);
/// # Ok(())
/// # }
/// ```
pub struct Workflow {
    tasks: Vec<Task>,
}

impl Workflow {
    /// Create a new workflow builder
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Number of tasks in the workflow
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the workflow has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Execute all tasks sequentially
    ///
    /// # Arguments
    ///
    /// * `context` - The run context; task outputs are recorded into it
    ///
    /// # Returns
    ///
    /// The per-task outputs and the final task's output
    pub async fn execute(&self, context: &mut Context) -> Result<WorkflowRun> {
        let mut outputs = Vec::with_capacity(self.tasks.len());

        for task in &self.tasks {
            info!("Running task '{}' with agent '{}'", task.name, task.agent.name());

            let input = task.render_input(&context.task_outputs());
            debug!(
                "Task '{}' input ({} chars): {}",
                task.name,
                input.len(),
                reporter_utils::truncate_chars(&input, 160)
            );

            let output = task.agent.process(input, context).await?;
            context.record_task_output(&task.name, &output);

            if let Some(path) = &task.output_file {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::ProcessingFailed(format!(
                            "Failed to create output directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                std::fs::write(path, &output).map_err(|e| {
                    Error::ProcessingFailed(format!(
                        "Failed to write task output to {}: {e}",
                        path.display()
                    ))
                })?;
                info!("Task '{}' output written to {}", task.name, path.display());
            }

            outputs.push(TaskOutput {
                name: task.name.clone(),
                output,
                output_file: task.output_file.clone(),
            });
        }

        let final_output = outputs
            .last()
            .map(|t| t.output.clone())
            .unwrap_or_default();

        Ok(WorkflowRun {
            outputs,
            final_output,
        })
    }
}

/// The result of one workflow execution
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    /// Every task's recorded output, in execution order
    pub outputs: Vec<TaskOutput>,

    /// Output of the last task
    pub final_output: String,
}

/// Builder for constructing workflows
pub struct WorkflowBuilder {
    tasks: Vec<Task>,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task to the workflow
    pub fn add_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Build the workflow
    ///
    /// # Errors
    ///
    /// Returns an error if the workflow has no tasks or duplicate task names
    pub fn build(self) -> Result<Workflow> {
        if self.tasks.is_empty() {
            return Err(Error::InitializationFailed(
                "Workflow has no tasks".to_string(),
            ));
        }

        for (i, task) in self.tasks.iter().enumerate() {
            if self.tasks[..i].iter().any(|t| t.name == task.name) {
                return Err(Error::InitializationFailed(format!(
                    "Duplicate task name: {}",
                    task.name
                )));
            }
        }

        Ok(Workflow { tasks: self.tasks })
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reporter_core::Agent;
    use std::sync::Arc;

    /// Agent that tags its input so tests can see what each task received
    struct TagAgent {
        tag: &'static str,
    }

    #[async_trait]
    impl Agent for TagAgent {
        async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
            Ok(format!("[{}] saw {} chars", self.tag, input.len()))
        }

        fn name(&self) -> &str {
            self.tag
        }
    }

    struct EchoContextAgent;

    #[async_trait]
    impl Agent for EchoContextAgent {
        async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
            Ok(input)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_empty_workflow_rejected() {
        assert!(Workflow::builder().build().is_err());
    }

    #[test]
    fn test_duplicate_task_names_rejected() {
        let result = Workflow::builder()
            .add_task(Task::new("a", Arc::new(TagAgent { tag: "x" }), "p"))
            .add_task(Task::new("a", Arc::new(TagAgent { tag: "y" }), "p"))
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_sequential_execution_records_outputs() {
        let workflow = Workflow::builder()
            .add_task(Task::new(
                "news_collection",
                Arc::new(TagAgent { tag: "researcher" }),
                "collect",
            ))
            .add_task(Task::new(
                "news_synthesis",
                Arc::new(TagAgent { tag: "synthesizer" }),
                "synthesize",
            ))
            .build()
            .unwrap();

        let mut ctx = Context::new().with_ticker("PETR4");
        let run = workflow.execute(&mut ctx).await.unwrap();

        assert_eq!(run.outputs.len(), 2);
        assert_eq!(run.outputs[0].name, "news_collection");
        assert!(ctx.task_output("news_collection").is_some());
        assert_eq!(run.final_output, run.outputs[1].output);
    }

    #[tokio::test]
    async fn test_later_task_sees_earlier_output() {
        let workflow = Workflow::builder()
            .add_task(Task::new(
                "first",
                Arc::new(EchoContextAgent),
                "alpha-output",
            ))
            .add_task(Task::new("second", Arc::new(EchoContextAgent), "beta"))
            .build()
            .unwrap();

        let mut ctx = Context::new();
        let run = workflow.execute(&mut ctx).await.unwrap();

        // The second task's rendered input embeds the first task's output.
        assert!(run.outputs[1].output.contains("### first"));
        assert!(run.outputs[1].output.contains("alpha-output"));
    }

    #[tokio::test]
    async fn test_output_file_written() {
        let dir = std::env::temp_dir().join("reporter-workflow-test");
        let path = dir.join("PETR4_investment_report.md");
        let _ = std::fs::remove_file(&path);

        let workflow = Workflow::builder()
            .add_task(
                Task::new("investment_rating", Arc::new(EchoContextAgent), "# Report")
                    .with_output_file(&path),
            )
            .build()
            .unwrap();

        let mut ctx = Context::new();
        workflow.execute(&mut ctx).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Report"));
        let _ = std::fs::remove_file(&path);
    }
}
