use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Sentiment error: {0}")]
    Sentiment(String),
}

impl IngestError {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            IngestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
