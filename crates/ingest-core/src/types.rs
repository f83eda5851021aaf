use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::compute_article_id;

/// Asset class of a ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerType {
    Stock,
    Crypto,
}

impl TickerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickerType::Stock => "stock",
            TickerType::Crypto => "crypto",
        }
    }
}

impl fmt::Display for TickerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticker known to the backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    #[serde(rename = "type")]
    pub ticker_type: TickerType,
}

impl Ticker {
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ticker_type: TickerType::Stock,
        }
    }
}

/// Per-ticker hint attached to a feed article, symbol not yet normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTickerSentiment {
    pub ticker: String,
    pub relevance_score: Option<f64>,
    pub ticker_sentiment_score: Option<f64>,
    pub ticker_sentiment_label: Option<String>,
}

/// Feed article after boundary validation. Lives for one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub summary: String,
    /// Always non-empty once past the feed client
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub ticker_sentiment: Vec<RawTickerSentiment>,
}

impl RawArticle {
    pub fn article_id(&self) -> String {
        compute_article_id(&self.url)
    }
}

/// Categorical sentiment returned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    #[serde(alias = "positive", alias = "Positive")]
    Positive,
    #[serde(alias = "negative", alias = "Negative")]
    Negative,
    #[serde(alias = "neutral", alias = "Neutral")]
    Neutral,
    #[serde(alias = "mixed", alias = "Mixed")]
    Mixed,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub mixed: f64,
}

/// Raw classifier answer for one text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub scores: SentimentScores,
}

/// Signed score and label persisted for an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSentiment {
    pub score: f64,
    pub label: String,
}

/// Article row as submitted to the backing API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub article_id: String,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub published_at: Option<DateTime<Utc>>,
    pub overall_sentiment_score: Option<f64>,
    pub overall_sentiment_label: Option<String>,
}

impl Article {
    pub fn from_raw(raw: &RawArticle, overall: Option<&OverallSentiment>) -> Self {
        Self {
            article_id: raw.article_id(),
            title: raw.title.clone(),
            url: raw.url.trim().to_string(),
            summary: raw.summary.clone(),
            published_at: raw.published_at,
            overall_sentiment_score: overall.map(|o| o.score),
            overall_sentiment_label: overall.map(|o| o.label.clone()),
        }
    }
}

/// Article-to-ticker association row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSentiment {
    pub article_id: String,
    pub ticker_symbol: String,
    pub ticker_type: TickerType,
    pub ticker_sentiment_score: Option<f64>,
    pub ticker_sentiment_label: Option<String>,
    pub relevance_score: Option<f64>,
}

/// Result of submitting an article to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { article_id: String },
    /// Store already holds an article for this url
    Conflict,
}
