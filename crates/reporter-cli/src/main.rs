//! Command-line interface for the invest reporter
//!
//! # Usage
//!
//! ```bash
//! # Full report pipeline (needs an LLM key)
//! export ANTHROPIC_API_KEY=...   # or OPENAI_API_KEY / OPENAI_API_BASE
//! invest-reporter report PETR4
//!
//! # Reconciliation engine only, no LLM involved
//! invest-reporter fundamentals BBAS3
//! ```

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use reporter_invest::{
    CanonicalField, InvestReporter, ReporterConfig, ReconciliationEngine, TickerSymbol,
    UnifiedFundamentalsRecord,
};
use reporter_llm::LlmProvider;
use reporter_llm::providers::{AnthropicProvider, OpenAiProvider};
use reporter_runtime::ReporterRuntime;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "invest-reporter")]
#[command(about = "Generate a narrative investment report for a B3 ticker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full news + fundamentals + rating pipeline
    Report {
        /// B3 ticker symbol (e.g. PETR4, BBAS3)
        #[arg(default_value = "PETR4")]
        ticker: String,

        /// Directory the report is written to
        #[arg(long, default_value = "reports")]
        output_dir: String,

        /// Model used by the pipeline agents
        #[arg(long)]
        model: Option<String>,
    },

    /// Fetch and reconcile fundamentals only (no LLM calls)
    Fundamentals {
        /// B3 ticker symbol (e.g. PETR4, BBAS3)
        ticker: String,

        /// Print the raw JSON record instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Pick the LLM provider from the environment
///
/// `ANTHROPIC_API_KEY` wins; otherwise `OPENAI_API_KEY` (with an optional
/// `OPENAI_API_BASE` for compatible local endpoints).
fn provider_from_env() -> anyhow::Result<Arc<dyn LlmProvider>> {
    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        let provider = AnthropicProvider::from_env().context("Anthropic provider setup failed")?;
        return Ok(Arc::new(provider));
    }

    if std::env::var("OPENAI_API_KEY").is_ok() {
        let provider = OpenAiProvider::from_env().context("OpenAI provider setup failed")?;
        return Ok(Arc::new(provider));
    }

    bail!("set ANTHROPIC_API_KEY or OPENAI_API_KEY to run the report pipeline")
}

fn build_config(model: Option<String>, output_dir: Option<String>) -> anyhow::Result<ReporterConfig> {
    let mut builder = ReporterConfig::builder().with_env_brapi_token();

    if let Some(model) = model {
        builder = builder.model(model);
    }
    if let Some(dir) = output_dir {
        builder = builder.output_dir(dir);
    }

    Ok(builder.build()?)
}

async fn run_report(ticker: &str, output_dir: String, model: Option<String>) -> anyhow::Result<()> {
    let config = Arc::new(build_config(model, Some(output_dir))?);
    let provider = provider_from_env()?;

    let runtime = Arc::new(
        ReporterRuntime::builder()
            .provider(provider)
            .default_model(config.model.clone())
            .build()?,
    );

    let reporter = InvestReporter::new(runtime, config);
    let run = reporter.kickoff(ticker).await?;

    info!("pipeline finished for {}", run.ticker);

    println!("Report written to {}", run.report_path.display());
    println!("\n{}", run.final_output);
    Ok(())
}

async fn run_fundamentals(ticker: &str, as_json: bool) -> anyhow::Result<()> {
    let config = ReporterConfig::builder().with_env_brapi_token().build()?;
    let ticker = TickerSymbol::parse(ticker)?;

    let engine = ReconciliationEngine::new(&config)?;
    let record = engine.unified_fundamentals(&ticker).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record.to_report_json())?);
        return Ok(());
    }

    print_record_table(&record);
    Ok(())
}

fn print_record_table(record: &UnifiedFundamentalsRecord) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value", "Source"]);

    for field in CanonicalField::ALL {
        if let Some(entry) = record.get(field) {
            table.add_row(vec![
                Cell::new(field.as_str()),
                Cell::new(record.display_value(field).unwrap_or_default()),
                Cell::new(entry.provider.as_str()),
            ]);
        }
    }

    println!("{} (quality: {})", record.ticker, record.quality);
    println!("{table}");

    if !record.discrepancies.is_empty() {
        println!("\nDiscrepancies:");
        for disc in &record.discrepancies {
            println!(
                "  {}: brapi={} investidor10={} ({:.1}% apart)",
                disc.field,
                disc.brapi,
                disc.investidor10,
                disc.relative_difference * 100.0
            );
        }
    }

    if !record.errors.is_empty() {
        println!("\nFetch errors:");
        for err in &record.errors {
            println!("  {err}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so the tracing filter can come from it too
    dotenvy::dotenv().ok();
    reporter_utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            ticker,
            output_dir,
            model,
        } => run_report(&ticker, output_dir, model).await,
        Command::Fundamentals { ticker, json } => run_fundamentals(&ticker, json).await,
    }
}
