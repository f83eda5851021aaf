//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use ingest_core::{
    Article, ArticleStore, Classification, CreateOutcome, FeedProvider, IngestError, RawArticle,
    SentimentClassifier, SentimentLabel, SentimentScores, Ticker, TickerSentiment,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

fn status_error(status: u16, url: &str) -> IngestError {
    IngestError::Status {
        status,
        url: url.to_string(),
        body: "fake failure".to_string(),
    }
}

#[derive(Default)]
pub struct FakeFeed {
    responses: Mutex<VecDeque<Vec<RawArticle>>>,
    fail_on_call: Option<(usize, u16)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeFeed {
    /// One response per call, in order; later calls get an empty feed.
    pub fn per_batch(responses: Vec<Vec<RawArticle>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    /// Fail the `call`-th request (0-based) with `status`
    pub fn failing_on_call(mut self, call: usize, status: u16) -> Self {
        self.fail_on_call = Some((call, status));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedProvider for FakeFeed {
    async fn fetch_feed(&self, symbols: &[String]) -> Result<Vec<RawArticle>, IngestError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(symbols.to_vec());
            calls.len() - 1
        };
        if let Some((n, status)) = self.fail_on_call {
            if n == call {
                return Err(status_error(
                    status,
                    "https://feed.example.com/query?function=NEWS_SENTIMENT",
                ));
            }
        }
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub struct FakeClassifier {
    result: Option<Classification>,
    texts: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub fn returning(label: SentimentLabel, scores: SentimentScores) -> Self {
        Self {
            result: Some(Classification { label, scores }),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn neutral() -> Self {
        Self::returning(
            SentimentLabel::Neutral,
            SentimentScores { positive: 0.2, negative: 0.1, neutral: 0.7, mixed: 0.0 },
        )
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentClassifier for FakeClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, IngestError> {
        self.texts.lock().unwrap().push(text.to_string());
        self.result
            .clone()
            .ok_or_else(|| IngestError::Sentiment("Service unavailable: Status: 503".to_string()))
    }
}

#[derive(Default)]
pub struct FakeStore {
    tickers: Vec<Ticker>,
    tickers_status: Option<u16>,
    articles_status: Option<u16>,
    bulk_status: Option<u16>,
    created_id: Option<String>,
    existing_urls: HashSet<String>,
    failing_symbols: HashSet<String>,

    articles: Mutex<Vec<Article>>,
    sentiments: Mutex<Vec<TickerSentiment>>,
    sentiment_attempts: Mutex<usize>,
    bulk_calls: Mutex<Vec<(Vec<Article>, Vec<TickerSentiment>)>>,
}

impl FakeStore {
    pub fn with_tickers(tickers: Vec<Ticker>) -> Self {
        Self {
            tickers,
            ..Default::default()
        }
    }

    pub fn failing_tickers(mut self, status: u16) -> Self {
        self.tickers_status = Some(status);
        self
    }

    pub fn failing_articles(mut self, status: u16) -> Self {
        self.articles_status = Some(status);
        self
    }

    pub fn failing_bulk(mut self, status: u16) -> Self {
        self.bulk_status = Some(status);
        self
    }

    /// Id the store hands back for created articles
    pub fn with_created_id(mut self, id: &str) -> Self {
        self.created_id = Some(id.to_string());
        self
    }

    pub fn with_existing_url(mut self, url: &str) -> Self {
        self.existing_urls.insert(url.trim().to_string());
        self
    }

    pub fn failing_symbol(mut self, symbol: &str) -> Self {
        self.failing_symbols.insert(symbol.to_string());
        self
    }

    pub fn articles(&self) -> Vec<Article> {
        self.articles.lock().unwrap().clone()
    }

    pub fn sentiments(&self) -> Vec<TickerSentiment> {
        self.sentiments.lock().unwrap().clone()
    }

    pub fn sentiment_attempts(&self) -> usize {
        *self.sentiment_attempts.lock().unwrap()
    }

    pub fn bulk_calls(&self) -> Vec<(Vec<Article>, Vec<TickerSentiment>)> {
        self.bulk_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleStore for FakeStore {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, IngestError> {
        match self.tickers_status {
            Some(status) => Err(status_error(status, "https://api.example.com/tickers/byType/all")),
            None => Ok(self.tickers.clone()),
        }
    }

    async fn create_article(&self, article: &Article) -> Result<CreateOutcome, IngestError> {
        if let Some(status) = self.articles_status {
            return Err(status_error(status, "https://api.example.com/articles"));
        }
        if self.existing_urls.contains(article.url.trim()) {
            return Ok(CreateOutcome::Conflict);
        }

        self.articles.lock().unwrap().push(article.clone());
        Ok(CreateOutcome::Created {
            article_id: self
                .created_id
                .clone()
                .unwrap_or_else(|| article.article_id.clone()),
        })
    }

    async fn upsert_ticker_sentiment(&self, sentiment: &TickerSentiment) -> Result<(), IngestError> {
        *self.sentiment_attempts.lock().unwrap() += 1;
        if self.failing_symbols.contains(&sentiment.ticker_symbol) {
            return Err(status_error(500, "https://api.example.com/articles/x/tickers"));
        }
        self.sentiments.lock().unwrap().push(sentiment.clone());
        Ok(())
    }

    async fn bulk_upsert(
        &self,
        articles: &[Article],
        sentiments: &[TickerSentiment],
    ) -> Result<(), IngestError> {
        self.bulk_calls
            .lock()
            .unwrap()
            .push((articles.to_vec(), sentiments.to_vec()));
        match self.bulk_status {
            Some(status) => Err(status_error(status, "https://api.example.com/articles/bulk")),
            None => Ok(()),
        }
    }
}
