use serde::Serialize;

/// How the overall sentiment of an article was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichStatus {
    Scored,
    /// Title and summary were both blank
    SkippedEmpty,
    Failed(String),
}

/// What the store did with an article
#[derive(Debug, Clone, PartialEq)]
pub enum WriteStatus {
    Created {
        sentiments_written: usize,
        sentiments_failed: usize,
    },
    /// Article already stored; sentiments only written under the reconcile policy
    Duplicate {
        sentiments_written: usize,
        sentiments_failed: usize,
    },
    /// Sent through the bulk route, which does not say whether the article was new
    Submitted { sentiments_sent: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleOutcome {
    pub url: String,
    pub article_id: String,
    pub enrich: EnrichStatus,
    pub write: WriteStatus,
    /// Feed tickers rejected by normalization or repeated within the article
    pub skipped_tickers: usize,
}

impl ArticleOutcome {
    pub fn sentiments_written(&self) -> usize {
        match self.write {
            WriteStatus::Created { sentiments_written, .. }
            | WriteStatus::Duplicate { sentiments_written, .. } => sentiments_written,
            WriteStatus::Submitted { sentiments_sent } => sentiments_sent,
            WriteStatus::Failed(_) => 0,
        }
    }

    pub fn sentiments_failed(&self) -> usize {
        match self.write {
            WriteStatus::Created { sentiments_failed, .. }
            | WriteStatus::Duplicate { sentiments_failed, .. } => sentiments_failed,
            WriteStatus::Submitted { .. } | WriteStatus::Failed(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub symbols: Vec<String>,
    pub articles: Vec<ArticleOutcome>,
}

/// Counters returned to the invoker
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub ok: bool,
    pub batches: usize,
    pub articles: usize,
    pub created: usize,
    pub duplicates: usize,
    pub submitted: usize,
    pub failed: usize,
    pub sentiments: usize,
    pub sentiment_failures: usize,
    pub skipped_tickers: usize,
    pub unscored: usize,
}

impl RunSummary {
    pub fn from_batches(batches: &[BatchReport]) -> Self {
        let mut summary = RunSummary {
            ok: true,
            batches: batches.len(),
            ..Default::default()
        };

        for outcome in batches.iter().flat_map(|b| b.articles.iter()) {
            summary.articles += 1;
            match outcome.write {
                WriteStatus::Created { .. } => summary.created += 1,
                WriteStatus::Duplicate { .. } => summary.duplicates += 1,
                WriteStatus::Submitted { .. } => summary.submitted += 1,
                WriteStatus::Failed(_) => summary.failed += 1,
            }
            if outcome.enrich != EnrichStatus::Scored {
                summary.unscored += 1;
            }
            summary.sentiments += outcome.sentiments_written();
            summary.sentiment_failures += outcome.sentiments_failed();
            summary.skipped_tickers += outcome.skipped_tickers;
        }

        summary
    }
}

/// Status-code envelope printed by the binary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(summary: &RunSummary) -> serde_json::Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(summary)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(write: WriteStatus, enrich: EnrichStatus, skipped: usize) -> ArticleOutcome {
        ArticleOutcome {
            url: "https://news.example.com".to_string(),
            article_id: "id".to_string(),
            enrich,
            write,
            skipped_tickers: skipped,
        }
    }

    #[test]
    fn test_summary_counts() {
        let batches = vec![
            BatchReport {
                symbols: vec!["AAPL".to_string()],
                articles: vec![
                    outcome(
                        WriteStatus::Created { sentiments_written: 2, sentiments_failed: 1 },
                        EnrichStatus::Scored,
                        1,
                    ),
                    outcome(
                        WriteStatus::Duplicate { sentiments_written: 0, sentiments_failed: 0 },
                        EnrichStatus::SkippedEmpty,
                        0,
                    ),
                ],
            },
            BatchReport {
                symbols: vec!["MSFT".to_string()],
                articles: vec![
                    outcome(
                        WriteStatus::Failed("HTTP 500".to_string()),
                        EnrichStatus::Failed("timeout".to_string()),
                        0,
                    ),
                    outcome(WriteStatus::Submitted { sentiments_sent: 3 }, EnrichStatus::Scored, 0),
                ],
            },
        ];

        let summary = RunSummary::from_batches(&batches);
        assert!(summary.ok);
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.articles, 4);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.submitted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.sentiments, 5);
        assert_eq!(summary.sentiment_failures, 1);
        assert_eq!(summary.skipped_tickers, 1);
        assert_eq!(summary.unscored, 2);
    }

    #[test]
    fn test_envelope_shape() {
        let summary = RunSummary::from_batches(&[]);
        let response = InvocationResponse::ok(&summary).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        let body: serde_json::Value = serde_json::from_str(json["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["batches"], 0);
        assert_eq!(body["sentimentFailures"], 0);
        assert_eq!(body["submitted"], 0);
    }
}
