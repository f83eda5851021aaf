mod wire;

pub use wire::parse_published_at;

use async_trait::async_trait;
use ingest_core::{FeedProvider, IngestError, RawArticle, MAX_FEED_BATCH};
use reqwest::{Client, Url};
use std::time::Duration;
use wire::NewsSentimentResponse;

pub const DEFAULT_ENDPOINT: &str = "https://www.alphavantage.co/query";

const NEWS_FUNCTION: &str = "NEWS_SENTIMENT";

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            endpoint,
            client,
        }
    }

    /// Get the news-sentiment feed for up to 10 symbols
    pub async fn get_news_sentiment(&self, symbols: &[String]) -> Result<Vec<RawArticle>, IngestError> {
        if symbols.is_empty() || symbols.len() > MAX_FEED_BATCH {
            return Err(IngestError::InvalidInput(format!(
                "feed batch must hold 1..={} symbols, got {}",
                MAX_FEED_BATCH,
                symbols.len()
            )));
        }

        let tickers = symbols.join(",");
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("function", NEWS_FUNCTION),
                ("tickers", tickers.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| IngestError::Request {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        let url = redact_api_key(request.url());

        tracing::debug!("Fetching news feed for [{}]", tickers);
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| IngestError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status {
                status: status.as_u16(),
                url,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: NewsSentimentResponse = response
            .json()
            .await
            .map_err(|e| IngestError::InvalidResponse {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let error_message = body.error_message.clone();
        let notice = body.information.clone().or_else(|| body.note.clone());
        let items = body.into_items();

        // Notices only matter when they replace the feed
        if items.is_empty() {
            if let Some(message) = error_message {
                return Err(IngestError::Upstream(format!("{} for {}", message, url)));
            }
            if let Some(notice) = notice {
                tracing::warn!("Alpha Vantage notice for [{}]: {}", tickers, notice);
            }
        } else if let Some(message) = error_message.or(notice) {
            tracing::debug!("Ignoring Alpha Vantage message next to a feed: {}", message);
        }

        let total = items.len();
        let articles: Vec<RawArticle> = items
            .into_iter()
            .filter_map(|item| item.into_raw_article())
            .collect();

        if articles.len() < total {
            tracing::warn!(
                "Dropped {} feed items without a url for [{}]",
                total - articles.len(),
                tickers
            );
        }

        Ok(articles)
    }
}

#[async_trait]
impl FeedProvider for AlphaVantageClient {
    async fn fetch_feed(&self, symbols: &[String]) -> Result<Vec<RawArticle>, IngestError> {
        self.get_news_sentiment(symbols).await
    }
}

/// Request URL as it may appear in logs and errors
fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
