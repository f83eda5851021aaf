use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use alphavantage_client::DEFAULT_ENDPOINT;
use sentiment_client::DEFAULT_SENTIMENT_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// What to do with ticker sentiments when the article already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Leave the stored article and its sentiments untouched
    #[default]
    Skip,
    /// Upsert sentiments under the derived article id
    Reconcile,
}

impl FromStr for ConflictPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ConflictPolicy::Skip),
            "reconcile" => Ok(ConflictPolicy::Reconcile),
            other => Err(anyhow!("unknown conflict policy '{}', expected skip|reconcile", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// One request per article and per ticker sentiment
    #[default]
    Item,
    /// One bulk request per feed batch
    Bulk,
}

impl FromStr for WriteMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" => Ok(WriteMode::Item),
            "bulk" => Ok(WriteMode::Bulk),
            other => Err(anyhow!("unknown write mode '{}', expected item|bulk", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    // Required
    pub alphavantage_api_key: String,
    pub api_base_url: String,

    // Collaborators
    pub alphavantage_endpoint: String,
    pub sentiment_url: String,
    pub http_timeout: Duration,

    // Write behaviour
    pub on_conflict: ConflictPolicy,
    pub write_mode: WriteMode,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = Self {
            alphavantage_api_key: get("ALPHAVANTAGE_API_KEY")
                .context("Missing required env: ALPHAVANTAGE_API_KEY")?,
            api_base_url: get("API_BASE_URL")
                .context("Missing required env: API_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),

            alphavantage_endpoint: get("ALPHAVANTAGE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            sentiment_url: get("SENTIMENT_URL")
                .unwrap_or_else(|| DEFAULT_SENTIMENT_URL.to_string()),
            http_timeout: Duration::from_secs(
                get("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),

            on_conflict: get("INGEST_ON_CONFLICT")
                .unwrap_or_else(|| "skip".to_string())
                .parse()?,
            write_mode: get("INGEST_WRITE_MODE")
                .unwrap_or_else(|| "item".to_string())
                .parse()?,
        };

        if config.http_timeout.is_zero() {
            return Err(anyhow!("HTTP_TIMEOUT_SECS must be greater than zero"));
        }
        // The bulk route upserts without reporting conflicts
        if config.write_mode == WriteMode::Bulk && config.on_conflict != ConflictPolicy::Reconcile {
            return Err(anyhow!("INGEST_WRITE_MODE=bulk requires INGEST_ON_CONFLICT=reconcile"));
        }

        Ok(config)
    }
}
