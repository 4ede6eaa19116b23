//! Configuration for the invest reporter

use crate::error::{InvestError, Result};
use crate::fundamentals::ReconcilePolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for report runs
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Model used by every pipeline agent
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Relative difference above which providers are considered to disagree
    pub discrepancy_tolerance: f64,

    /// Minimum canonical fields for a record to be considered viable
    pub min_viable_fields: usize,

    /// Timeout for a single provider fetch attempt
    pub fetch_timeout: Duration,

    /// Whether a transport failure is retried once
    pub retry_transport: bool,

    /// Maximum number of headlines returned by a news search
    pub news_max_results: usize,

    /// News lookback window in days
    pub news_lookback_days: u32,

    /// News language code (e.g. "pt-BR")
    pub news_language: String,

    /// News region code (e.g. "BR")
    pub news_region: String,

    /// Optional brapi API token
    pub brapi_token: Option<String>,

    /// Directory the final report is written to
    pub output_dir: PathBuf,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            discrepancy_tolerance: 0.05,
            min_viable_fields: 3,
            fetch_timeout: Duration::from_secs(10),
            retry_transport: true,
            news_max_results: 10,
            news_lookback_days: 30,
            news_language: "pt-BR".to_string(),
            news_region: "BR".to_string(),
            brapi_token: None,
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl ReporterConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReporterConfigBuilder {
        ReporterConfigBuilder::default()
    }

    /// Load the brapi token from the `BRAPI_TOKEN` environment variable
    pub fn with_env_brapi_token(mut self) -> Self {
        if let Ok(token) = std::env::var("BRAPI_TOKEN") {
            self.brapi_token = Some(token);
        }
        self
    }

    /// The merge policy derived from this configuration
    pub fn reconcile_policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            tolerance: self.discrepancy_tolerance,
            min_viable_fields: self.min_viable_fields,
            ..ReconcilePolicy::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(InvestError::ConfigError("model must not be empty".to_string()));
        }

        if !(0.0..1.0).contains(&self.discrepancy_tolerance) || self.discrepancy_tolerance == 0.0 {
            return Err(InvestError::ConfigError(
                "discrepancy_tolerance must be in (0, 1)".to_string(),
            ));
        }

        if self.min_viable_fields == 0 {
            return Err(InvestError::ConfigError(
                "min_viable_fields must be at least 1".to_string(),
            ));
        }

        if self.fetch_timeout.is_zero() {
            return Err(InvestError::ConfigError(
                "fetch_timeout must be non-zero".to_string(),
            ));
        }

        if self.news_max_results == 0 {
            return Err(InvestError::ConfigError(
                "news_max_results must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ReporterConfig
#[derive(Debug, Default)]
pub struct ReporterConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    discrepancy_tolerance: Option<f64>,
    min_viable_fields: Option<usize>,
    fetch_timeout: Option<Duration>,
    retry_transport: Option<bool>,
    news_max_results: Option<usize>,
    news_lookback_days: Option<u32>,
    news_language: Option<String>,
    news_region: Option<String>,
    brapi_token: Option<String>,
    output_dir: Option<PathBuf>,
}

impl ReporterConfigBuilder {
    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the discrepancy tolerance
    pub fn discrepancy_tolerance(mut self, tolerance: f64) -> Self {
        self.discrepancy_tolerance = Some(tolerance);
        self
    }

    /// Set the minimum viable field count
    pub fn min_viable_fields(mut self, count: usize) -> Self {
        self.min_viable_fields = Some(count);
        self
    }

    /// Set the per-attempt fetch timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Enable or disable the single transport retry
    pub fn retry_transport(mut self, retry: bool) -> Self {
        self.retry_transport = Some(retry);
        self
    }

    /// Set the maximum number of headlines per search
    pub fn news_max_results(mut self, max: usize) -> Self {
        self.news_max_results = Some(max);
        self
    }

    /// Set the news lookback window in days
    pub fn news_lookback_days(mut self, days: u32) -> Self {
        self.news_lookback_days = Some(days);
        self
    }

    /// Set the news language code
    pub fn news_language(mut self, language: impl Into<String>) -> Self {
        self.news_language = Some(language.into());
        self
    }

    /// Set the news region code
    pub fn news_region(mut self, region: impl Into<String>) -> Self {
        self.news_region = Some(region.into());
        self
    }

    /// Set the brapi API token
    pub fn brapi_token(mut self, token: impl Into<String>) -> Self {
        self.brapi_token = Some(token.into());
        self
    }

    /// Load the brapi token from the environment
    pub fn with_env_brapi_token(mut self) -> Self {
        if let Ok(token) = std::env::var("BRAPI_TOKEN") {
            self.brapi_token = Some(token);
        }
        self
    }

    /// Set the report output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReporterConfig> {
        let defaults = ReporterConfig::default();

        let config = ReporterConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            discrepancy_tolerance: self
                .discrepancy_tolerance
                .unwrap_or(defaults.discrepancy_tolerance),
            min_viable_fields: self.min_viable_fields.unwrap_or(defaults.min_viable_fields),
            fetch_timeout: self.fetch_timeout.unwrap_or(defaults.fetch_timeout),
            retry_transport: self.retry_transport.unwrap_or(defaults.retry_transport),
            news_max_results: self.news_max_results.unwrap_or(defaults.news_max_results),
            news_lookback_days: self
                .news_lookback_days
                .unwrap_or(defaults.news_lookback_days),
            news_language: self.news_language.unwrap_or(defaults.news_language),
            news_region: self.news_region.unwrap_or(defaults.news_region),
            brapi_token: self.brapi_token,
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReporterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discrepancy_tolerance, 0.05);
        assert_eq!(config.min_viable_fields, 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ReporterConfig::builder()
            .model("gpt-4o-mini")
            .discrepancy_tolerance(0.1)
            .fetch_timeout(Duration::from_secs(5))
            .news_max_results(5)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.discrepancy_tolerance, 0.1);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.news_max_results, 5);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        assert!(ReporterConfig::builder()
            .discrepancy_tolerance(0.0)
            .build()
            .is_err());
        assert!(ReporterConfig::builder()
            .discrepancy_tolerance(1.5)
            .build()
            .is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ReporterConfig::builder()
            .fetch_timeout(Duration::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn test_reconcile_policy_mirrors_config() {
        let config = ReporterConfig::builder()
            .discrepancy_tolerance(0.08)
            .min_viable_fields(2)
            .build()
            .unwrap();

        let policy = config.reconcile_policy();
        assert_eq!(policy.tolerance, 0.08);
        assert_eq!(policy.min_viable_fields, 2);
    }
}
