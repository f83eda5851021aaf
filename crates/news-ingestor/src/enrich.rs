use ingest_core::{
    truncate_chars, OverallSentiment, RawArticle, SentimentClassifier, MAX_SENTIMENT_TEXT_CHARS,
};

use crate::report::EnrichStatus;

/// Classifier input for an article, `None` when there is nothing to classify.
pub fn build_classification_text(title: &str, summary: &str) -> Option<String> {
    let text = format!("{}. {}", title, summary);
    let text = text.trim();
    // A lone separator is what two blank fields produce
    if text.is_empty() || text == "." {
        return None;
    }
    Some(truncate_chars(text, MAX_SENTIMENT_TEXT_CHARS).to_string())
}

/// Overall sentiment for one article. Never fails; problems end up in the status.
pub async fn annotate(
    classifier: &dyn SentimentClassifier,
    article: &RawArticle,
) -> (Option<OverallSentiment>, EnrichStatus) {
    let Some(text) = build_classification_text(&article.title, &article.summary) else {
        return (None, EnrichStatus::SkippedEmpty);
    };

    match classifier.classify(&text).await {
        Ok(classification) => (
            Some(OverallSentiment::from(&classification)),
            EnrichStatus::Scored,
        ),
        Err(e) => {
            tracing::warn!("Sentiment classification failed for {}: {}", article.url, e);
            (None, EnrichStatus::Failed(e.to_string()))
        }
    }
}
