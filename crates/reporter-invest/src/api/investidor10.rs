//! Investidor10 fundamentals page client (scraped provider)
//!
//! Investidor10 serves pt-BR HTML with the indicators embedded in prose
//! ("A ação está cotada a R$ 36,75", "possui um P/L de 5,65"). This adapter
//! downloads the page, strips it to text and extracts the indicators with
//! compiled patterns, keeping every locale quirk away from the rest of the
//! engine. Raw values keep their pt-BR formatting; the normalizer does the
//! unit work.

use crate::error::{FetchError, InvestError, Result};
use crate::fundamentals::provider::{FundamentalsProvider, RawFundamentalsRecord};
use crate::fundamentals::schema::ProviderKind;
use crate::ticker::TickerSymbol;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use regex::Regex;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://investidor10.com.br";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 6;
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Investidor10 fundamentals page client
pub struct Investidor10Client {
    client: Client,
    patterns: ExtractionPatterns,
    rate_limiter: SharedRateLimiter,
}

/// The compiled extraction patterns
///
/// Compiled once at construction so a bad pattern surfaces as a
/// configuration-time error, never mid-fetch.
struct ExtractionPatterns {
    script: Regex,
    style: Regex,
    tag: Regex,
    price: Regex,
    variation_12m: Regex,
    pe: Regex,
    pvp: Regex,
    dividend_yield: Regex,
    roe: Regex,
    market_cap: Regex,
}

const NUMBER: &str = r"[0-9\.]+,[0-9]{1,2}|[0-9\.]+";

impl ExtractionPatterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            script: pattern(r"(?is)<script[^>]*>.*?</script>")?,
            style: pattern(r"(?is)<style[^>]*>.*?</style>")?,
            tag: pattern(r"<[^>]+>")?,
            price: pattern(&format!(
                r"(?i)está\s+cotad[oa]\s+a\s+R\$\s*({NUMBER})"
            ))?,
            variation_12m: pattern(&format!(
                r"(?i)variaç[aã]o\s+de\s*([\-\+]?(?:{NUMBER}))\s*%"
            ))?,
            pe: pattern(&format!(r"(?i)P\s*/\s*L\s+de\s*({NUMBER})"))?,
            pvp: pattern(&format!(r"(?i)P\s*/\s*VP\s+de\s*({NUMBER})"))?,
            dividend_yield: pattern(&format!(
                r"(?i)Dividend\s*Yield[^0-9%]*({NUMBER})\s*%"
            ))?,
            roe: pattern(&format!(r"(?i)\bROE\b\D{{0,40}}?(-?(?:{NUMBER}))\s*%"))?,
            market_cap: pattern(&format!(
                r"(?i)valor\s+de\s+mercado\D{{0,40}}?R\$\s*({NUMBER})\s*(Trilh\w*|Bilh\w*|Milh\w*|Mil\b)?"
            ))?,
        })
    }

    /// Reduce an HTML document to extractable text
    fn to_text(&self, html: &str) -> String {
        let without_scripts = self.script.replace_all(html, " ");
        let without_styles = self.style.replace_all(&without_scripts, " ");
        let text = self.tag.replace_all(&without_styles, " ");
        reporter_utils::decode_entities(&text)
    }

    /// Extract the indicators into a raw record, pt-BR formatting intact
    fn extract(&self, html: &str) -> RawFundamentalsRecord {
        let text = self.to_text(html);
        let mut record = RawFundamentalsRecord::new(ProviderKind::Investidor10);

        if let Some(price) = first_group(&self.price, &text) {
            record.insert_text("Preço", format!("R$ {price}"));
        }
        if let Some(variation) = first_group(&self.variation_12m, &text) {
            record.insert_text("Variação (12M)", format!("{variation}%"));
        }
        if let Some(pe) = first_group(&self.pe, &text) {
            record.insert_text("P/L", pe);
        }
        if let Some(pvp) = first_group(&self.pvp, &text) {
            record.insert_text("P/VP", pvp);
        }
        if let Some(dy) = first_group(&self.dividend_yield, &text) {
            record.insert_text("Dividend Yield", format!("{dy}%"));
        }
        if let Some(roe) = first_group(&self.roe, &text) {
            record.insert_text("ROE", format!("{roe}%"));
        }
        if let Some(caps) = self.market_cap.captures(&text) {
            let amount = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            record.insert_text(
                "Valor de mercado",
                format!("R$ {amount} {suffix}").trim().to_string(),
            );
        }

        record
    }
}

fn pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| InvestError::PatternError(e.to_string()))
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

impl Investidor10Client {
    /// Create a new client
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(DEFAULT_RATE_LIMIT_PER_MINUTE)
    }

    /// Create a new client with an explicit rate limit (requests per minute)
    pub fn with_rate_limit(rate_limit: u32) -> Result<Self> {
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
            patterns: ExtractionPatterns::compile()?,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Page path segment: FIIs live under `/fiis/`, stocks under `/acoes/`
    fn path_segment(ticker: &TickerSymbol) -> &'static str {
        if ticker.as_str().ends_with("11") {
            "fiis"
        } else {
            "acoes"
        }
    }

    async fn fetch_page(&self, ticker: &TickerSymbol) -> std::result::Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "{BASE_URL}/{}/{}/",
            Self::path_segment(ticker),
            ticker.as_str().to_lowercase()
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| {
                FetchError::transport(ProviderKind::Investidor10, format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => FetchError::not_found(
                    ProviderKind::Investidor10,
                    format!("no page for {}", ticker.as_str()),
                ),
                429 => FetchError::rate_limited(
                    ProviderKind::Investidor10,
                    format!("HTTP {status}"),
                ),
                _ => FetchError::transport(
                    ProviderKind::Investidor10,
                    format!("HTTP {status} for {url}"),
                ),
            });
        }

        response.text().await.map_err(|e| {
            FetchError::transport(ProviderKind::Investidor10, format!("body read failed: {e}"))
        })
    }
}

#[async_trait]
impl FundamentalsProvider for Investidor10Client {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Investidor10
    }

    async fn fetch(
        &self,
        ticker: &TickerSymbol,
    ) -> std::result::Result<RawFundamentalsRecord, FetchError> {
        let html = self.fetch_page(ticker).await?;
        let record = self.patterns.extract(&html);

        if record.is_empty() {
            return Err(FetchError::parse(
                ProviderKind::Investidor10,
                format!("no indicators extracted for {}", ticker.as_str()),
            ));
        }

        debug!(
            "investidor10 extracted {} indicators for {}",
            record.len(),
            ticker.as_str()
        );
        Ok(record)
    }
}
