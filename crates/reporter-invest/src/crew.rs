//! The InvestReporter crew: agents wired into the sequential pipeline
//!
//! One kickoff produces one report: validate the ticker, render the task
//! prompts, run news collection → news synthesis → fundamentals →
//! investment rating, and persist the final markdown report under the
//! configured output directory.

use reporter_core::Context;
use reporter_runtime::ReporterRuntime;
use reporter_workflow::{Task, TaskOutput, Workflow};
use chrono::{Datelike, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::agents::{
    FundamentalsAnalystAgent, InvestmentRaterAgent, NewsResearcherAgent, NewsSynthesizerAgent,
};
use crate::config::ReporterConfig;
use crate::error::Result;
use crate::prompts::{TaskPrompts, user::expected};
use crate::ticker::TickerSymbol;

/// The outcome of one report run
#[derive(Debug)]
pub struct ReportRun {
    /// The validated ticker the report is about
    pub ticker: TickerSymbol,
    /// Where the final report was written
    pub report_path: PathBuf,
    /// The final report text
    pub final_output: String,
    /// Every task's output, in pipeline order
    pub task_outputs: Vec<TaskOutput>,
}

/// Builds and runs the four-stage report pipeline
pub struct InvestReporter {
    runtime: Arc<ReporterRuntime>,
    config: Arc<ReporterConfig>,
}

impl InvestReporter {
    /// Create a new crew
    pub fn new(runtime: Arc<ReporterRuntime>, config: Arc<ReporterConfig>) -> Self {
        Self { runtime, config }
    }

    /// Where the report for a ticker is written
    pub fn report_path(&self, ticker: &TickerSymbol) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}_investment_report.md", ticker.as_str()))
    }

    /// Generate the investment report for a ticker
    ///
    /// The ticker is validated before anything else; no fetch is dispatched
    /// for invalid input.
    pub async fn kickoff(&self, ticker_input: &str) -> Result<ReportRun> {
        let ticker = TickerSymbol::parse(ticker_input)?;
        let current_year = Utc::now().year().to_string();

        info!("Starting report run for {ticker} ({current_year})");

        let prompts = TaskPrompts::new()?;
        let render = |task: &str| prompts.render(task, ticker.as_str(), &current_year);

        let researcher = Arc::new(NewsResearcherAgent::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.config),
        )?);
        let synthesizer = Arc::new(NewsSynthesizerAgent::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.config),
        ));
        let analyst = Arc::new(FundamentalsAnalystAgent::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.config),
        )?);
        let rater = Arc::new(InvestmentRaterAgent::new(
            Arc::clone(&self.runtime),
            Arc::clone(&self.config),
        ));

        let report_path = self.report_path(&ticker);

        let workflow = Workflow::builder()
            .add_task(
                Task::new("news_collection", researcher, render("news_collection")?)
                    .with_expected_output(expected::NEWS_COLLECTION),
            )
            .add_task(
                Task::new("news_synthesis", synthesizer, render("news_synthesis")?)
                    .with_expected_output(expected::NEWS_SYNTHESIS),
            )
            .add_task(
                Task::new("fundamentals", analyst, render("fundamentals")?)
                    .with_expected_output(expected::FUNDAMENTALS),
            )
            .add_task(
                Task::new("investment_rating", rater, render("investment_rating")?)
                    .with_expected_output(expected::INVESTMENT_RATING)
                    .with_output_file(&report_path),
            )
            .build()?;

        let mut context = Context::new()
            .with_ticker(ticker.as_str())
            .with_current_year(&current_year);

        let run = workflow.execute(&mut context).await?;

        info!("Report for {ticker} written to {}", report_path.display());

        Ok(ReportRun {
            ticker,
            report_path,
            final_output: run.final_output,
            task_outputs: run.outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_is_keyed_by_uppercase_ticker() {
        let config = Arc::new(
            ReporterConfig::builder()
                .output_dir("out/reports")
                .build()
                .unwrap(),
        );

        struct NoProvider;
        #[async_trait::async_trait]
        impl reporter_llm::LlmProvider for NoProvider {
            async fn complete(
                &self,
                _request: reporter_llm::CompletionRequest,
            ) -> reporter_llm::Result<reporter_llm::CompletionResponse> {
                unimplemented!()
            }
            fn name(&self) -> &str {
                "none"
            }
        }

        let runtime = Arc::new(
            ReporterRuntime::builder()
                .provider(Arc::new(NoProvider))
                .build()
                .unwrap(),
        );

        let reporter = InvestReporter::new(runtime, config);
        let ticker = TickerSymbol::parse("petr4").unwrap();

        assert_eq!(
            reporter.report_path(&ticker),
            PathBuf::from("out/reports/PETR4_investment_report.md")
        );
    }

    #[tokio::test]
    async fn test_kickoff_rejects_invalid_ticker_before_any_work() {
        struct PanicProvider;
        #[async_trait::async_trait]
        impl reporter_llm::LlmProvider for PanicProvider {
            async fn complete(
                &self,
                _request: reporter_llm::CompletionRequest,
            ) -> reporter_llm::Result<reporter_llm::CompletionResponse> {
                panic!("no LLM call should happen for an invalid ticker");
            }
            fn name(&self) -> &str {
                "panic"
            }
        }

        let runtime = Arc::new(
            ReporterRuntime::builder()
                .provider(Arc::new(PanicProvider))
                .build()
                .unwrap(),
        );
        let reporter = InvestReporter::new(runtime, Arc::new(ReporterConfig::default()));

        let result = reporter.kickoff("definitely not a ticker").await;
        assert!(result.is_err());
    }
}
