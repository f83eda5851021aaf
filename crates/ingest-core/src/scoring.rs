use crate::types::{Classification, OverallSentiment, SentimentScores};

/// Classifier input limit, in characters
pub const MAX_SENTIMENT_TEXT_CHARS: usize = 4800;

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// `positive - negative`, rounded to 4 decimals. Stays in [-1, 1] for in-range components.
pub fn signed_score(scores: &SentimentScores) -> f64 {
    round4(scores.positive - scores.negative)
}

impl From<&Classification> for OverallSentiment {
    fn from(c: &Classification) -> Self {
        Self {
            score: signed_score(&c.scores),
            label: c.label.as_str().to_string(),
        }
    }
}
