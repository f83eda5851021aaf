pub mod error;

pub use error::{SentimentError, SentimentResult};

use async_trait::async_trait;
use ingest_core::{
    truncate_chars, Classification, IngestError, SentimentClassifier, SentimentScores,
    MAX_SENTIMENT_TEXT_CHARS,
};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_SENTIMENT_URL: &str = "http://localhost:8001";

/// The only language the pipeline sends
pub const LANGUAGE_CODE: &str = "en";

#[derive(Debug, Clone, Serialize)]
struct DetectSentimentRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// HTTP client for the sentiment classification service
#[derive(Clone)]
pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Classify English text, truncated to the service limit
    pub async fn detect_sentiment(&self, text: &str) -> SentimentResult<Classification> {
        let text = truncate_chars(text.trim(), MAX_SENTIMENT_TEXT_CHARS);
        if text.is_empty() {
            return Err(SentimentError::EmptyText);
        }

        let request = DetectSentimentRequest {
            text,
            language: LANGUAGE_CODE,
        };

        let response = self
            .client
            .post(format!("{}/detect-sentiment", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let result = response
            .json::<Classification>()
            .await
            .map_err(|e| SentimentError::InvalidResponse(e.to_string()))?;
        validate_scores(&result.scores)?;

        Ok(result)
    }
}

fn validate_scores(scores: &SentimentScores) -> SentimentResult<()> {
    let components = [
        ("positive", scores.positive),
        ("negative", scores.negative),
        ("neutral", scores.neutral),
        ("mixed", scores.mixed),
    ];
    for (name, value) in components {
        if !(0.0..=1.0).contains(&value) {
            return Err(SentimentError::InvalidResponse(format!(
                "{} score {} outside [0, 1]",
                name, value
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl SentimentClassifier for SentimentClient {
    async fn classify(&self, text: &str) -> Result<Classification, IngestError> {
        Ok(self.detect_sentiment(text).await?)
    }
}
