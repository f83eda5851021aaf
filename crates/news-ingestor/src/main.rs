//! news-ingestor: one ingestion pass per invocation.
//!
//! Usage:
//!   ALPHAVANTAGE_API_KEY=... API_BASE_URL=https://api.example.com/api news-ingestor
//!
//! Logs go to stderr; stdout carries only the `{statusCode, body}` envelope.

use std::sync::Arc;

use alphavantage_client::AlphaVantageClient;
use anyhow::{Context, Result};
use backend_client::BackendClient;
use news_ingestor::{IngestConfig, InvocationResponse, Pipeline, PipelineOptions};
use sentiment_client::SentimentClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "news_ingestor=info,alphavantage_client=info,backend_client=info,sentiment_client=warn".into()
    });
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = IngestConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Backing API: {}", config.api_base_url);
    tracing::info!("  Feed endpoint: {}", config.alphavantage_endpoint);
    tracing::info!("  Sentiment service: {}", config.sentiment_url);
    tracing::info!("  HTTP timeout: {}s", config.http_timeout.as_secs());
    tracing::info!(
        "  On conflict: {:?}, write mode: {:?}",
        config.on_conflict,
        config.write_mode
    );

    let feed = AlphaVantageClient::new(
        config.alphavantage_api_key.clone(),
        config.alphavantage_endpoint.clone(),
        config.http_timeout,
    );
    let classifier = SentimentClient::new(config.sentiment_url.clone(), config.http_timeout);
    let store = BackendClient::new(config.api_base_url.clone(), config.http_timeout);

    let pipeline = Pipeline::new(
        Arc::new(feed),
        Arc::new(classifier),
        Arc::new(store),
        PipelineOptions {
            on_conflict: config.on_conflict,
            write_mode: config.write_mode,
        },
    );

    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Ingestion run failed: {}", e);
            return Err(e).context("Ingestion run failed");
        }
    };

    let summary = report.summary();
    tracing::info!(
        "Done! {} articles over {} batches: {} created, {} duplicates, {} submitted, {} failed, {} sentiments",
        summary.articles,
        summary.batches,
        summary.created,
        summary.duplicates,
        summary.submitted,
        summary.failed,
        summary.sentiments
    );

    let response = InvocationResponse::ok(&summary)?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
