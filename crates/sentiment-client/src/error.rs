use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty text")]
    EmptyText,
}

pub type SentimentResult<T> = Result<T, SentimentError>;

impl From<SentimentError> for ingest_core::IngestError {
    fn from(e: SentimentError) -> Self {
        ingest_core::IngestError::Sentiment(e.to_string())
    }
}
