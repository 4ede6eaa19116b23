//! Tool exposing headline search to LLM agents

use reporter_core::Result as AgentResult;
use reporter_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::{GoogleNewsClient, NewsQuery};
use crate::config::ReporterConfig;

/// Tool that searches recent news headlines via Google News RSS
pub struct NewsSearchTool {
    client: GoogleNewsClient,
    config: Arc<ReporterConfig>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
    #[serde(default)]
    days: Option<u32>,
}

impl NewsSearchTool {
    /// Create the tool with the run configuration's news defaults
    pub fn new(config: Arc<ReporterConfig>) -> crate::error::Result<Self> {
        Ok(Self {
            client: GoogleNewsClient::new()?,
            config,
        })
    }

    async fn search(&self, params: NewsParams) -> crate::error::Result<Value> {
        let query = NewsQuery {
            query: params.query.clone(),
            max_results: params.max_results.unwrap_or(self.config.news_max_results),
            days: params.days.unwrap_or(self.config.news_lookback_days),
            language: self.config.news_language.clone(),
            region: self.config.news_region.clone(),
        };

        let headlines = self.client.search(&query).await?;

        let items: Vec<Value> = headlines
            .iter()
            .map(|h| {
                json!({
                    "title": h.title,
                    "source": h.source,
                    "published": h.published_at.map(|d| d.to_rfc3339()),
                    "url": h.url,
                })
            })
            .collect();

        let count = items.len();
        let mut result = json!({
            "query": params.query,
            "count": count,
            "items": items,
        });

        if count == 0 {
            result["note"] = json!("No recent headlines found for this query.");
        }

        Ok(result)
    }
}

#[async_trait]
impl Tool for NewsSearchTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: NewsParams = serde_json::from_value(params).map_err(|e| {
            reporter_core::Error::ProcessingFailed(format!("Invalid parameters: {}", e))
        })?;

        self.search(params)
            .await
            .map_err(|e| reporter_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "news_search"
    }

    fn description(&self) -> &str {
        "Search recent news headlines from Google News RSS for a stock ticker or \
         company name. Returns a structured list of title, source, published \
         date and url. Use it to gather news context about a company."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query, e.g. 'PETR4 Petrobras'"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of headlines to return (optional)"
                },
                "days": {
                    "type": "integer",
                    "description": "Lookback window in days (optional)"
                }
            },
            "required": ["query"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let config = Arc::new(ReporterConfig::default());
        let tool = NewsSearchTool::new(config).unwrap();

        assert_eq!(tool.name(), "news_search");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.input_schema()["required"][0], "query");
    }

    #[tokio::test]
    async fn test_rejects_malformed_params() {
        let config = Arc::new(ReporterConfig::default());
        let tool = NewsSearchTool::new(config).unwrap();

        let result = tool.execute(json!({"max_results": 3})).await;
        assert!(result.unwrap_err().to_string().contains("Invalid parameters"));
    }
}
