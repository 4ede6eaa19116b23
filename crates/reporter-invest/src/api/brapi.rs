//! brapi.dev quote API client (structured provider)
//!
//! brapi is the structured B3 quote API; one GET returns a JSON document of
//! exchange-sourced market data. This adapter maps that document into a
//! `RawFundamentalsRecord` and classifies every failure as a typed
//! `FetchError`.

use crate::error::{FetchError, InvestError, Result};
use crate::fundamentals::provider::{FundamentalsProvider, RawFundamentalsRecord};
use crate::fundamentals::schema::ProviderKind;
use crate::ticker::TickerSymbol;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://brapi.dev/api";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 10;
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// brapi.dev quote API client
pub struct BrapiClient {
    client: Client,
    token: Option<String>,
    rate_limiter: SharedRateLimiter,
}

/// One quote entry from the brapi response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiQuote {
    pub symbol: String,
    pub long_name: Option<String>,
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    #[serde(rename = "averageDailyVolume3Month")]
    pub average_daily_volume_3_month: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_earnings: Option<f64>,
    pub earnings_per_share: Option<f64>,
    pub dividend_yield: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BrapiResponse {
    #[serde(default)]
    results: Vec<BrapiQuote>,
}

impl BrapiClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `token` - Optional brapi API token; anonymous requests are allowed
    ///   at a lower rate limit
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_rate_limit(token, DEFAULT_RATE_LIMIT_PER_MINUTE)
    }

    /// Create a new client with an explicit rate limit (requests per minute)
    pub fn with_rate_limit(token: Option<String>, rate_limit: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(InvestError::NetworkError)?;

        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit)
                .unwrap_or_else(|| NonZeroU32::new(DEFAULT_RATE_LIMIT_PER_MINUTE).unwrap()),
        );

        Ok(Self {
            client,
            token,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Fetch and decode the quote document for a ticker
    async fn fetch_quote(&self, ticker: &TickerSymbol) -> std::result::Result<BrapiQuote, FetchError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{BASE_URL}/quote/{}", ticker.as_str());
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            FetchError::transport(ProviderKind::Brapi, format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                404 => FetchError::not_found(
                    ProviderKind::Brapi,
                    format!("no quote for {}", ticker.as_str()),
                ),
                429 => FetchError::rate_limited(ProviderKind::Brapi, body),
                _ => FetchError::transport(ProviderKind::Brapi, format!("HTTP {status}: {body}")),
            });
        }

        let body = response.text().await.map_err(|e| {
            FetchError::transport(ProviderKind::Brapi, format!("body read failed: {e}"))
        })?;

        parse_quote_payload(&body, ticker)
    }
}

/// Decode a brapi quote document
///
/// Split out from the HTTP path so payload handling is testable offline.
fn parse_quote_payload(
    body: &str,
    ticker: &TickerSymbol,
) -> std::result::Result<BrapiQuote, FetchError> {
    let decoded: BrapiResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(ProviderKind::Brapi, format!("invalid JSON: {e}")))?;

    decoded.results.into_iter().next().ok_or_else(|| {
        FetchError::not_found(
            ProviderKind::Brapi,
            format!("empty results for {}", ticker.as_str()),
        )
    })
}

/// Map a decoded quote into the raw record handed to the normalizer
fn to_raw_record(quote: &BrapiQuote) -> RawFundamentalsRecord {
    let mut record = RawFundamentalsRecord::new(ProviderKind::Brapi);

    if let Some(name) = &quote.long_name {
        record.insert_text("longName", name);
    }
    if let Some(currency) = &quote.currency {
        record.insert_text("currency", currency);
    }

    let numbers = [
        ("regularMarketPrice", quote.regular_market_price),
        ("fiftyTwoWeekHigh", quote.fifty_two_week_high),
        ("fiftyTwoWeekLow", quote.fifty_two_week_low),
        ("averageDailyVolume3Month", quote.average_daily_volume_3_month),
        ("marketCap", quote.market_cap),
        ("priceEarnings", quote.price_earnings),
        ("earningsPerShare", quote.earnings_per_share),
        ("dividendYield", quote.dividend_yield),
    ];

    for (name, value) in numbers {
        if let Some(value) = value {
            record.insert_number(name, value);
        }
    }

    record
}

#[async_trait]
impl FundamentalsProvider for BrapiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Brapi
    }

    async fn fetch(
        &self,
        ticker: &TickerSymbol,
    ) -> std::result::Result<RawFundamentalsRecord, FetchError> {
        let quote = self.fetch_quote(ticker).await?;
        let record = to_raw_record(&quote);
        debug!(
            "brapi returned {} raw fields for {}",
            record.len(),
            ticker.as_str()
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAYLOAD: &str = r#"{
        "results": [
            {
                "symbol": "BBAS3",
                "longName": "Banco do Brasil S.A.",
                "currency": "BRL",
                "regularMarketPrice": 21.31,
                "fiftyTwoWeekHigh": 29.84,
                "fiftyTwoWeekLow": 18.91,
                "averageDailyVolume3Month": 35407900,
                "marketCap": 122124000000,
                "priceEarnings": 4.38,
                "earningsPerShare": 4.86
            }
        ],
        "requestedAt": "2026-08-07T12:00:00.000Z",
        "took": "0ms"
    }"#;

    fn ticker() -> TickerSymbol {
        TickerSymbol::parse("BBAS3").unwrap()
    }

    #[test]
    fn test_parse_quote_payload() {
        let quote = parse_quote_payload(SAMPLE_PAYLOAD, &ticker()).unwrap();
        assert_eq!(quote.symbol, "BBAS3");
        assert_eq!(quote.regular_market_price, Some(21.31));
        assert_eq!(quote.market_cap, Some(122_124_000_000.0));
        assert_eq!(quote.dividend_yield, None);
    }

    #[test]
    fn test_empty_results_is_not_found() {
        let err = parse_quote_payload(r#"{"results": []}"#, &ticker()).unwrap_err();
        assert_eq!(err.kind, crate::error::FetchErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_quote_payload("<html>oops</html>", &ticker()).unwrap_err();
        assert_eq!(err.kind, crate::error::FetchErrorKind::Parse);
    }

    #[test]
    fn test_to_raw_record_skips_absent_fields() {
        let quote = parse_quote_payload(SAMPLE_PAYLOAD, &ticker()).unwrap();
        let record = to_raw_record(&quote);

        assert_eq!(record.get("regularMarketPrice").unwrap().as_number(), Some(21.31));
        assert!(record.get("dividendYield").is_none());
        assert_eq!(
            record.get("longName").unwrap().as_text(),
            Some("Banco do Brasil S.A.")
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_live_quote() {
        let client = BrapiClient::new(None).unwrap();
        let record = client.fetch(&ticker()).await.unwrap();
        assert!(record.get("regularMarketPrice").is_some());
    }
}
