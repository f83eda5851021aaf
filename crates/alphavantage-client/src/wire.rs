use chrono::{DateTime, NaiveDateTime, Utc};
use ingest_core::{RawArticle, RawTickerSentiment};
use serde::{Deserialize, Deserializer};

/// `NEWS_SENTIMENT` response body
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewsSentimentResponse {
    #[serde(default)]
    pub feed: Option<Vec<FeedItem>>,
    #[serde(default)]
    pub articles: Option<Vec<FeedItem>>,
    #[serde(default, rename = "Information")]
    pub information: Option<String>,
    #[serde(default, rename = "Note")]
    pub note: Option<String>,
    #[serde(default, rename = "Error Message")]
    pub error_message: Option<String>,
}

impl NewsSentimentResponse {
    /// `feed`, else `articles`, else nothing
    pub fn into_items(self) -> Vec<FeedItem> {
        self.feed
            .filter(|f| !f.is_empty())
            .or(self.articles)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeedItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time_published: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub ticker_sentiment: Option<Vec<FeedTickerSentiment>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeedTickerSentiment {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub relevance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ticker_sentiment_score: Option<f64>,
    #[serde(default)]
    pub ticker_sentiment_label: Option<String>,
}

/// Alpha Vantage sends most numbers as strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Accepts `20240131T154500`, `20240131T1545` and RFC 3339.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl FeedItem {
    /// Boundary validation. `None` when the item has no url to derive an identity from.
    pub fn into_raw_article(self) -> Option<RawArticle> {
        let url = self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;

        let published = self.time_published.or(self.published_at);
        let published_at = published.as_deref().and_then(parse_published_at);
        if published_at.is_none() {
            tracing::debug!("Unparseable publish time {:?} for {}", published, url);
        }

        let ticker_sentiment = self
            .ticker_sentiment
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                let ticker = t.ticker?.trim().to_string();
                (!ticker.is_empty()).then_some(RawTickerSentiment {
                    ticker,
                    relevance_score: t.relevance_score,
                    ticker_sentiment_score: t.ticker_sentiment_score,
                    ticker_sentiment_label: t.ticker_sentiment_label,
                })
            })
            .collect();

        Some(RawArticle {
            title: self.title.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            url,
            published_at,
            ticker_sentiment,
        })
    }
}
