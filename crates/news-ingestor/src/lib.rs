//! news-ingestor: pull the Alpha Vantage news-sentiment feed for every tracked
//! ticker, score each article, and upsert articles plus per-ticker sentiment
//! rows into the backing data API.

pub mod config;
pub mod enrich;
pub mod pipeline;
pub mod report;
pub mod tickers;
pub mod writer;

#[cfg(test)]
mod testing;

pub use config::{ConflictPolicy, IngestConfig, WriteMode};
pub use pipeline::{Pipeline, PipelineOptions, RunReport};
pub use report::{ArticleOutcome, BatchReport, EnrichStatus, InvocationResponse, RunSummary, WriteStatus};
pub use tickers::{get_tickers, DEFAULT_SEED_SYMBOLS};
