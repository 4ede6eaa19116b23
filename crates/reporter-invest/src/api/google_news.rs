//! Google News RSS headline client
//!
//! Fetches the Google News RSS search feed for a ticker/company query and
//! returns a finite list of headline records. Simulator-style headlines
//! ("quanto ganharia se tivesse investido...") are filtered out - they match
//! ticker queries constantly and carry no signal.

use crate::error::{InvestError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const FEED_URL: &str = "https://news.google.com/rss/search";
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Titles excluded from results, one pattern per simulator phrasing
const EXCLUDED_TITLE_PATTERNS: [&str; 6] = [
    r"\bquanto\s+ganharia\b",
    r"\bquanto\s+renderia\b",
    r"\bse\s+(?:voce|você)\s+tivesse\s+investido\b",
    r"\bse\s+tivesse\s+investido\b",
    r"\bsimulador\b",
    r"\bsimula(?:c|ç)",
];

/// One news headline
#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    /// Headline title, entities decoded
    pub title: String,
    /// Publishing outlet, when the feed names one
    pub source: Option<String>,
    /// Publication time, when the feed's date parses
    pub published_at: Option<DateTime<Utc>>,
    /// Link to the article
    pub url: String,
}

/// Parameters for one headline search
#[derive(Debug, Clone)]
pub struct NewsQuery {
    /// Search query, e.g. "PETR4 Petrobras"
    pub query: String,
    /// Maximum number of headlines to return
    pub max_results: usize,
    /// Lookback window in days
    pub days: u32,
    /// Language code for results
    pub language: String,
    /// Region code for results
    pub region: String,
}

impl NewsQuery {
    /// A query with the Brazilian-market defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 10,
            days: 30,
            language: "pt-BR".to_string(),
            region: "BR".to_string(),
        }
    }
}

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    item: Regex,
    title: Regex,
    link: Regex,
    pub_date: Regex,
    source: Regex,
    excluded_titles: Regex,
}

impl GoogleNewsClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(InvestError::NetworkError)?;

        Ok(Self {
            client,
            item: feed_pattern(r"(?s)<item>(.*?)</item>")?,
            title: feed_pattern(r"(?s)<title>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</title>")?,
            link: feed_pattern(r"(?s)<link>(.*?)</link>")?,
            pub_date: feed_pattern(r"<pubDate>(.*?)</pubDate>")?,
            source: feed_pattern(r#"(?s)<source[^>]*>(.*?)</source>"#)?,
            excluded_titles: feed_pattern(&format!(
                "(?i){}",
                EXCLUDED_TITLE_PATTERNS.join("|")
            ))?,
        })
    }

    /// Build the feed URL for a query
    fn feed_url(&self, query: &NewsQuery) -> Result<Url> {
        let mut url =
            Url::parse(FEED_URL).map_err(|e| InvestError::NewsFeed(format!("bad feed URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("q", &format!("{} when:{}d", query.query, query.days))
            .append_pair("hl", &query.language)
            .append_pair("gl", &query.region)
            .append_pair("ceid", &format!("{}:{}", query.region, query.language));

        Ok(url)
    }

    /// Search recent headlines
    ///
    /// An empty result list is not an error; only transport and decoding
    /// failures are.
    pub async fn search(&self, query: &NewsQuery) -> Result<Vec<Headline>> {
        let url = self.feed_url(query)?;
        debug!("Fetching news feed {url}");

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(InvestError::NewsFeed(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(self.parse_feed(&body, query.max_results))
    }

    /// Parse feed XML into headlines, applying the exclusion filter
    fn parse_feed(&self, xml: &str, max_results: usize) -> Vec<Headline> {
        let max_results = if max_results == 0 { 10 } else { max_results };
        let mut headlines = Vec::new();

        for item in self.item.captures_iter(xml) {
            if headlines.len() >= max_results {
                break;
            }

            let body = match item.get(1) {
                Some(m) => m.as_str(),
                None => continue,
            };

            let Some(title) = first_group(&self.title, body) else {
                continue;
            };
            let title = reporter_utils::decode_entities(&title);
            if self.excluded_titles.is_match(&title) {
                debug!("Excluding simulator headline: {title}");
                continue;
            }

            let Some(url) = first_group(&self.link, body) else {
                continue;
            };

            let source = first_group(&self.source, body)
                .map(|s| reporter_utils::decode_entities(s.trim()));

            let published_at = first_group(&self.pub_date, body)
                .and_then(|date| DateTime::parse_from_rfc2822(date.trim()).ok())
                .map(|date| date.with_timezone(&Utc));

            headlines.push(Headline {
                title,
                source,
                published_at,
                url: url.trim().to_string(),
            });
        }

        headlines
    }
}

fn feed_pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| InvestError::PatternError(e.to_string()))
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
