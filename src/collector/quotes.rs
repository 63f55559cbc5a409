//! HTTP quote provider
//!
//! Fetches daily closes from a market-data gateway speaking a small JSON
//! protocol: `GET {base}/api/quotes/daily?code=sz399997&since=2023-01-31`
//! returning `[{"date": "2023-02-01", "close": 14980.0}, ...]`.
//!
//! Requests retry with exponential backoff (3 tries, 2 s base, doubling),
//! except rate-limit responses, which are surfaced to the scheduler.

use super::{CollectorError, QuoteSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

const MAX_TRIES: u32 = 3;
const BASE_DELAY: Duration = Duration::from_secs(2);

/// One daily close from the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    pub date: NaiveDate,
    pub close: f64,
}

/// Configuration for the HTTP quote provider
#[derive(Debug, Clone)]
pub struct QuoteProviderConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for QuoteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9510".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Quote provider backed by an HTTP market-data gateway
pub struct HttpQuoteSource {
    client: Client,
    config: QuoteProviderConfig,
}

impl HttpQuoteSource {
    pub fn new(config: QuoteProviderConfig) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .user_agent("Barometer/0.1")
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| CollectorError::Provider(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn fetch_once(
        &self,
        code: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, CollectorError> {
        let mut url = format!("{}/api/quotes/daily?code={}", self.config.base_url, code);
        if let Some(since) = since {
            url.push_str(&format!("&since={}", since.format("%Y-%m-%d")));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CollectorError::Provider(e.to_string()))?;

        if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(CollectorError::RateLimited(retry_after));
        }

        if !response.status().is_success() {
            return Err(CollectorError::Provider(format!(
                "quote gateway returned {} for {}",
                response.status(),
                code
            )));
        }

        let mut quotes: Vec<Quote> = response
            .json()
            .await
            .map_err(|e| CollectorError::Parse(e.to_string()))?;

        quotes.sort_by_key(|q| q.date);
        Ok(quotes)
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    fn name(&self) -> &str {
        "http-quotes"
    }

    async fn daily_closes(
        &self,
        code: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, CollectorError> {
        with_retry(code, || self.fetch_once(code, since)).await
    }
}

/// Retry with exponential backoff
///
/// Rate-limit errors are not retried here; the scheduler owns that pause.
async fn with_retry<T, F, Fut>(what: &str, mut op: F) -> Result<T, CollectorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CollectorError>>,
{
    let mut delay = BASE_DELAY;

    for attempt in 1..MAX_TRIES {
        match op().await {
            Ok(value) => return Ok(value),
            Err(CollectorError::RateLimited(secs)) => {
                return Err(CollectorError::RateLimited(secs));
            }
            Err(e) => {
                tracing::warn!(code = what, attempt, error = %e, "Fetch failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }

    op().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_recovers_after_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry("test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(CollectorError::Provider("transient".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_gives_up_after_max_tries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(CollectorError::Provider("down".into())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_TRIES);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(CollectorError::RateLimited(30)) }
        })
        .await;

        assert!(matches!(result, Err(CollectorError::RateLimited(30))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
