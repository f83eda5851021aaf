use async_trait::async_trait;
use ingest_core::{
    Article, ArticleStore, CreateOutcome, IngestError, Ticker, TickerSentiment, TickerType,
};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the backing data API that stores tickers and articles
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedArticle {
    #[serde(default)]
    article_id: Option<String>,
}

/// Ticker row; the store may hold asset types this job does not handle
#[derive(Debug, Deserialize)]
struct StoredTicker {
    symbol: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl StoredTicker {
    fn into_ticker(self) -> Option<Ticker> {
        let ticker_type = match self.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("stock") => TickerType::Stock,
            Some("crypto") => TickerType::Crypto,
            _ => return None,
        };
        Some(Ticker {
            symbol: self.symbol,
            ticker_type,
        })
    }
}

#[derive(Debug, Serialize)]
struct BulkUpsertRequest<'a> {
    articles: &'a [Article],
    sentiments: &'a [TickerSentiment],
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get every ticker the store knows about
    pub async fn get_all_tickers(&self) -> Result<Vec<Ticker>, IngestError> {
        let url = format!("{}/tickers/byType/all", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;
        let response = ensure_success(response, &url).await?;

        let stored: Vec<StoredTicker> = response.json().await.map_err(|e| IngestError::InvalidResponse {
            url,
            message: e.to_string(),
        })?;

        Ok(stored.into_iter().filter_map(StoredTicker::into_ticker).collect())
    }

    /// Create an article. A 409 means the url is already stored.
    pub async fn post_article(&self, article: &Article) -> Result<CreateOutcome, IngestError> {
        let url = format!("{}/articles", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(article)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Article already stored: {}", article.url);
            return Ok(CreateOutcome::Conflict);
        }
        let response = ensure_success(response, &url).await?;

        let created: CreatedArticle = response.json().await.map_err(|e| IngestError::InvalidResponse {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let article_id = match created.article_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                tracing::debug!("No articleId in create response for {}, using derived id", article.url);
                article.article_id.clone()
            }
        };
        Ok(CreateOutcome::Created { article_id })
    }

    /// Upsert one article/ticker association
    pub async fn post_ticker_sentiment(&self, sentiment: &TickerSentiment) -> Result<(), IngestError> {
        let url = format!("{}/articles/{}/tickers", self.base_url, sentiment.article_id);
        let response = self
            .client
            .post(&url)
            .json(sentiment)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;
        ensure_success(response, &url).await?;
        Ok(())
    }

    /// Create articles and upsert sentiments in one request
    pub async fn post_bulk(
        &self,
        articles: &[Article],
        sentiments: &[TickerSentiment],
    ) -> Result<(), IngestError> {
        if articles.is_empty() && sentiments.is_empty() {
            return Ok(());
        }

        let url = format!("{}/articles/bulk", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&BulkUpsertRequest { articles, sentiments })
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;
        ensure_success(response, &url).await?;
        Ok(())
    }
}

fn request_error(url: &str, e: reqwest::Error) -> IngestError {
    IngestError::Request {
        url: url.to_string(),
        message: e.to_string(),
    }
}

async fn ensure_success(response: Response, url: &str) -> Result<Response, IngestError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(IngestError::Status {
        status: response.status().as_u16(),
        url: url.to_string(),
        body: response.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl ArticleStore for BackendClient {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, IngestError> {
        self.get_all_tickers().await
    }

    async fn create_article(&self, article: &Article) -> Result<CreateOutcome, IngestError> {
        self.post_article(article).await
    }

    async fn upsert_ticker_sentiment(&self, sentiment: &TickerSentiment) -> Result<(), IngestError> {
        self.post_ticker_sentiment(sentiment).await
    }

    async fn bulk_upsert(
        &self,
        articles: &[Article],
        sentiments: &[TickerSentiment],
    ) -> Result<(), IngestError> {
        self.post_bulk(articles, sentiments).await
    }
}
