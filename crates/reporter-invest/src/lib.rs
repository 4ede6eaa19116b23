//! Investment report generation for B3 tickers
//!
//! This crate produces a narrative investment report for a Brazilian (B3)
//! stock ticker by combining recent news headlines with fundamentals pulled
//! from two independent, frequently inconsistent sources. It contains:
//!
//! - Ticker validation (B3 symbol convention, enforced before any fetch)
//! - Two fundamentals provider adapters: the brapi quote API (structured) and
//!   the Investidor10 fundamentals page (scraped)
//! - A normalizer that maps both providers onto one canonical field schema
//! - The reconciliation engine: field-by-field merge with provenance,
//!   discrepancy detection, and an overall data-quality flag; total even
//!   under complete source failure
//! - A Google News RSS headline client
//! - LLM tools and the four pipeline agents (news researcher, news
//!   synthesizer, fundamentals analyst, investment rater)
//! - The `InvestReporter` crew wiring them into a sequential workflow that
//!   writes `reports/{TICKER}_investment_report.md`
//!
//! # Example
//!
//! ```rust,ignore
//! use reporter_invest::{InvestReporter, ReporterConfig};
//! use reporter_runtime::ReporterRuntime;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = Arc::new(ReporterRuntime::builder()
//!         .provider(/* your provider */)
//!         .build()?);
//!
//!     let config = Arc::new(ReporterConfig::default());
//!     let reporter = InvestReporter::new(runtime, config);
//!
//!     let run = reporter.kickoff("PETR4").await?;
//!     println!("report written to {}", run.report_path.display());
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod crew;
pub mod error;
pub mod fundamentals;
pub mod prompts;
pub mod ticker;
pub mod tools;

// Re-export main types for convenience
pub use agents::{
    FundamentalsAnalystAgent, InvestmentRaterAgent, NewsResearcherAgent, NewsSynthesizerAgent,
};
pub use config::ReporterConfig;
pub use crew::{InvestReporter, ReportRun};
pub use error::{FetchError, FetchErrorKind, InvestError, Result};
pub use fundamentals::{
    CanonicalField, DataQuality, FieldDiscrepancy, NormalizedField, ProviderKind,
    ReconcilePolicy, ReconciliationEngine, UnifiedFundamentalsRecord,
};
pub use ticker::TickerSymbol;
