use ingest_core::{
    normalize_symbol, Article, ArticleStore, CreateOutcome, RawTickerSentiment, TickerSentiment,
};
use std::collections::HashSet;

use crate::config::ConflictPolicy;
use crate::report::WriteStatus;

/// Ticker sentiment rows for an article plus the number of feed entries dropped.
///
/// Every row reuses the article's overall score and label; the feed's own
/// per-ticker score is not persisted. Relevance is passed through.
pub fn build_ticker_sentiments(
    article: &Article,
    article_id: &str,
    raw: &[RawTickerSentiment],
) -> (Vec<TickerSentiment>, usize) {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for entry in raw {
        let Some((symbol, ticker_type)) = normalize_symbol(&entry.ticker) else {
            tracing::debug!("Skipping ticker {:?} on {}", entry.ticker, article.url);
            skipped += 1;
            continue;
        };
        if !seen.insert(symbol.clone()) {
            skipped += 1;
            continue;
        }

        rows.push(TickerSentiment {
            article_id: article_id.to_string(),
            ticker_symbol: symbol,
            ticker_type,
            ticker_sentiment_score: article.overall_sentiment_score,
            ticker_sentiment_label: article.overall_sentiment_label.clone(),
            relevance_score: entry.relevance_score,
        });
    }

    (rows, skipped)
}

/// Create the article, then upsert one sentiment per valid ticker.
///
/// Returns the write status and the number of skipped feed tickers.
pub async fn write_article(
    store: &dyn ArticleStore,
    article: &Article,
    raw: &[RawTickerSentiment],
    on_conflict: ConflictPolicy,
) -> (WriteStatus, usize) {
    let created = match store.create_article(article).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Failed to create article {}: {}", article.url, e);
            return (WriteStatus::Failed(e.to_string()), 0);
        }
    };

    let (article_id, duplicate) = match (created, on_conflict) {
        (CreateOutcome::Created { article_id }, _) => (article_id, false),
        (CreateOutcome::Conflict, ConflictPolicy::Skip) => {
            tracing::debug!("Article exists, skipping ticker sentiments: {}", article.url);
            return (
                WriteStatus::Duplicate {
                    sentiments_written: 0,
                    sentiments_failed: 0,
                },
                0,
            );
        }
        (CreateOutcome::Conflict, ConflictPolicy::Reconcile) => (article.article_id.clone(), true),
    };

    let (rows, skipped) = build_ticker_sentiments(article, &article_id, raw);
    let mut written = 0;
    let mut failed = 0;

    for row in &rows {
        match store.upsert_ticker_sentiment(row).await {
            Ok(()) => written += 1,
            Err(e) => {
                failed += 1;
                tracing::warn!(
                    "Failed to write sentiment for {} on {}: {}",
                    row.ticker_symbol,
                    article.url,
                    e
                );
            }
        }
    }

    let status = if duplicate {
        WriteStatus::Duplicate {
            sentiments_written: written,
            sentiments_failed: failed,
        }
    } else {
        WriteStatus::Created {
            sentiments_written: written,
            sentiments_failed: failed,
        }
    };
    (status, skipped)
}
