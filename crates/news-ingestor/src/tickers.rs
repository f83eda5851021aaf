use ingest_core::{ArticleStore, IngestError, Ticker, TickerType};
use std::collections::HashSet;

/// Seed list used while the store has no stock tickers yet
pub const DEFAULT_SEED_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "JPM",
];

/// Stock tickers to query this run, deduplicated in first-seen order.
pub async fn get_tickers(store: &dyn ArticleStore) -> Result<Vec<Ticker>, IngestError> {
    let stored = store.list_tickers().await?;

    let mut seen = HashSet::new();
    let tickers: Vec<Ticker> = stored
        .into_iter()
        .filter(|t| t.ticker_type == TickerType::Stock)
        .map(|t| t.symbol.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .map(Ticker::stock)
        .collect();

    if tickers.is_empty() {
        tracing::info!(
            "No stock tickers in store, seeding with {} defaults",
            DEFAULT_SEED_SYMBOLS.len()
        );
        return Ok(DEFAULT_SEED_SYMBOLS.iter().map(|s| Ticker::stock(*s)).collect());
    }

    Ok(tickers)
}
