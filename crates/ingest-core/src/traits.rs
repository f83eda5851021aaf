use async_trait::async_trait;
use crate::{Article, Classification, CreateOutcome, IngestError, RawArticle, Ticker, TickerSentiment};

/// News feed for a batch of symbols
#[async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_feed(&self, symbols: &[String]) -> Result<Vec<RawArticle>, IngestError>;
}

/// Text sentiment classification (English only)
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, IngestError>;
}

/// Backing data API: tickers, articles and their ticker sentiments
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, IngestError>;

    async fn create_article(&self, article: &Article) -> Result<CreateOutcome, IngestError>;

    async fn upsert_ticker_sentiment(&self, sentiment: &TickerSentiment) -> Result<(), IngestError>;

    async fn bulk_upsert(
        &self,
        articles: &[Article],
        sentiments: &[TickerSentiment],
    ) -> Result<(), IngestError>;
}
