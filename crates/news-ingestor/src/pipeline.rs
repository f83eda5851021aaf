use ingest_core::{
    chunk_symbols, Article, ArticleStore, FeedProvider, IngestError, RawArticle,
    SentimentClassifier, MAX_FEED_BATCH,
};
use std::sync::Arc;

use crate::config::{ConflictPolicy, WriteMode};
use crate::enrich::annotate;
use crate::report::{ArticleOutcome, BatchReport, EnrichStatus, RunSummary, WriteStatus};
use crate::tickers::get_tickers;
use crate::writer::{build_ticker_sentiments, write_article};

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub on_conflict: ConflictPolicy,
    pub write_mode: WriteMode,
}

/// One ingestion pass: tickers -> feed batches -> enrich -> store.
pub struct Pipeline {
    feed: Arc<dyn FeedProvider>,
    classifier: Arc<dyn SentimentClassifier>,
    store: Arc<dyn ArticleStore>,
    options: PipelineOptions,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub batches: Vec<BatchReport>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_batches(&self.batches)
    }
}

/// An article after enrichment, ready to be written
struct EnrichedArticle {
    raw: RawArticle,
    article: Article,
    enrich: EnrichStatus,
}

impl EnrichedArticle {
    fn into_outcome(self, write: WriteStatus, skipped_tickers: usize) -> ArticleOutcome {
        ArticleOutcome {
            url: self.article.url,
            article_id: self.article.article_id,
            enrich: self.enrich,
            write,
            skipped_tickers,
        }
    }
}

impl Pipeline {
    pub fn new(
        feed: Arc<dyn FeedProvider>,
        classifier: Arc<dyn SentimentClassifier>,
        store: Arc<dyn ArticleStore>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            feed,
            classifier,
            store,
            options,
        }
    }

    /// Run over every ticker. Ticker-source and feed failures abort the run.
    pub async fn run(&self) -> Result<RunReport, IngestError> {
        let tickers = get_tickers(self.store.as_ref()).await?;
        let symbols: Vec<String> = tickers.into_iter().map(|t| t.symbol).collect();
        let batches = chunk_symbols(&symbols, MAX_FEED_BATCH);
        let total = batches.len();
        tracing::info!(
            "Ingesting {} symbols in {} batches ({:?} writes)",
            symbols.len(),
            total,
            self.options.write_mode
        );

        let mut reports = Vec::with_capacity(total);
        for (i, batch) in batches.into_iter().enumerate() {
            let articles = self.feed.fetch_feed(&batch).await?;
            tracing::info!(
                "[{}/{}] {} articles for [{}]",
                i + 1,
                total,
                articles.len(),
                batch.join(",")
            );

            let report = self.process_batch(batch, articles).await;
            reports.push(report);
        }

        Ok(RunReport { batches: reports })
    }

    /// Enrich and store one feed response. Item failures stay inside the report.
    pub async fn process_batch(&self, symbols: Vec<String>, articles: Vec<RawArticle>) -> BatchReport {
        let mut enriched = Vec::with_capacity(articles.len());
        for raw in articles {
            enriched.push(self.enrich(raw).await);
        }

        let outcomes = match self.options.write_mode {
            WriteMode::Item => self.write_items(enriched).await,
            WriteMode::Bulk => self.write_bulk(enriched).await,
        };

        BatchReport {
            symbols,
            articles: outcomes,
        }
    }

    async fn enrich(&self, raw: RawArticle) -> EnrichedArticle {
        let (overall, enrich) = annotate(self.classifier.as_ref(), &raw).await;
        let article = Article::from_raw(&raw, overall.as_ref());

        EnrichedArticle {
            raw,
            article,
            enrich,
        }
    }

    async fn write_items(&self, enriched: Vec<EnrichedArticle>) -> Vec<ArticleOutcome> {
        let mut outcomes = Vec::with_capacity(enriched.len());
        for item in enriched {
            let (write, skipped) = write_article(
                self.store.as_ref(),
                &item.article,
                &item.raw.ticker_sentiment,
                self.options.on_conflict,
            )
            .await;

            outcomes.push(item.into_outcome(write, skipped));
        }
        outcomes
    }

    /// Bulk rows carry the derived article id since the store returns none per row.
    /// The route upserts, so sentiments of already stored articles are sent too;
    /// config only allows this mode together with the reconcile policy.
    async fn write_bulk(&self, enriched: Vec<EnrichedArticle>) -> Vec<ArticleOutcome> {
        if enriched.is_empty() {
            return Vec::new();
        }

        let mut articles = Vec::with_capacity(enriched.len());
        let mut sentiments = Vec::new();
        let mut per_article = Vec::with_capacity(enriched.len());

        for item in &enriched {
            let (rows, skipped) =
                build_ticker_sentiments(&item.article, &item.article.article_id, &item.raw.ticker_sentiment);
            per_article.push((rows.len(), skipped));
            sentiments.extend(rows);
            articles.push(item.article.clone());
        }

        let result = self.store.bulk_upsert(&articles, &sentiments).await;
        if let Err(e) = &result {
            tracing::warn!("Bulk write of {} articles failed: {}", articles.len(), e);
        }

        enriched
            .into_iter()
            .zip(per_article)
            .map(|(item, (rows, skipped))| {
                let write = match &result {
                    Ok(()) => WriteStatus::Submitted { sentiments_sent: rows },
                    Err(e) => WriteStatus::Failed(e.to_string()),
                };
                item.into_outcome(write, skipped)
            })
            .collect()
    }
}
