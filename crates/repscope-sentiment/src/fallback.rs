//! Deterministic keyword analysis used when the reasoning service is unusable.

use std::collections::HashSet;

use crate::report::{default_topics, trend_window, NO_NEGATIVE, NO_POSITIVE};
use crate::types::{AnalysisReport, CandidateSnippet, ConfidenceLevel, Sentiment, TopicScore};

pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "positive",
    "success",
    "successful",
    "growth",
    "growing",
    "profit",
    "profitable",
    "innovative",
    "innovation",
    "award",
    "win",
    "wins",
    "strong",
    "record",
    "best",
    "love",
    "impressive",
    "launch",
    "launches",
    "expansion",
    "partnership",
    "praised",
    "beat",
    "surge",
];

pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "negative",
    "loss",
    "losses",
    "decline",
    "declining",
    "lawsuit",
    "scandal",
    "fraud",
    "layoffs",
    "layoff",
    "recall",
    "fine",
    "fined",
    "investigation",
    "worst",
    "failed",
    "failure",
    "crisis",
    "controversy",
    "complaint",
    "complaints",
    "weak",
    "drop",
    "plunge",
];

const SCORE_STEP: i64 = 5;
const MIN_SCORE: i64 = 25;
const MAX_SCORE: i64 = 75;

/// Positive and negative vocabulary hits for one snippet.
///
/// Each vocabulary word counts at most once per snippet. Words are compared
/// whole, lower-cased, with surrounding punctuation trimmed.
#[must_use]
pub fn keyword_hits(text: &str) -> (u32, u32) {
    let words: HashSet<String> = text
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let count = |vocab: &[&str]| {
        let hits = vocab.iter().filter(|w| words.contains(**w)).count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    };

    (count(POSITIVE_WORDS), count(NEGATIVE_WORDS))
}

/// Map a vocabulary delta onto the bounded fallback score.
///
/// `50 + 5 × delta`, clamped to `[25, 75]` so the fallback never claims an
/// extreme reading.
#[must_use]
pub fn fallback_score(positive_hits: u32, negative_hits: u32) -> u8 {
    let delta = i64::from(positive_hits) - i64::from(negative_hits);
    let score = (50 + SCORE_STEP * delta).clamp(MIN_SCORE, MAX_SCORE);
    u8::try_from(score).unwrap_or(50)
}

/// Build a complete report from keyword counts alone.
///
/// Every snippet is classified by its own hits to fill the three counts; the
/// overall score comes from the corpus-wide delta. The strongest positive and
/// negative snippets (by net hits, first wins on ties) become the quotes.
#[must_use]
pub fn fallback_report(candidates: &[CandidateSnippet]) -> AnalysisReport {
    let mut positive_hits = 0u32;
    let mut negative_hits = 0u32;
    let mut positive_count = 0u32;
    let mut negative_count = 0u32;
    let mut neutral_count = 0u32;
    let mut best_positive: Option<(i64, &str)> = None;
    let mut best_negative: Option<(i64, &str)> = None;

    for candidate in candidates {
        let text = candidate.snippet.text.as_str();
        let (pos, neg) = keyword_hits(text);
        positive_hits = positive_hits.saturating_add(pos);
        negative_hits = negative_hits.saturating_add(neg);

        let net = i64::from(pos) - i64::from(neg);
        if net > 0 {
            positive_count += 1;
            if best_positive.is_none_or(|(best, _)| net > best) {
                best_positive = Some((net, text));
            }
        } else if net < 0 {
            negative_count += 1;
            if best_negative.is_none_or(|(best, _)| net < best) {
                best_negative = Some((net, text));
            }
        } else {
            neutral_count += 1;
        }
    }

    let score = fallback_score(positive_hits, negative_hits);
    tracing::debug!(
        positive_hits,
        negative_hits,
        score,
        "computed fallback keyword score"
    );

    AnalysisReport {
        score,
        sentiment: Sentiment::from_score(score),
        confidence_level: ConfidenceLevel::Low,
        positive_count,
        negative_count,
        neutral_count,
        most_positive: best_positive.map_or_else(|| NO_POSITIVE.to_string(), |(_, t)| t.to_string()),
        most_negative: best_negative.map_or_else(|| NO_NEGATIVE.to_string(), |(_, t)| t.to_string()),
        key_insights: vec![
            "Detailed analysis unavailable; this report uses basic keyword matching.".to_string(),
            format!(
                "Keyword scan of {} item(s) found {positive_hits} positive and {negative_hits} negative signal(s).",
                candidates.len()
            ),
        ],
        recommendations: vec![
            "Retry the analysis later for a full assessment.".to_string(),
            "Review the most recent coverage manually before acting on this score.".to_string(),
        ],
        brand_awareness_score: score,
        market_sentiment_score: score,
        public_opinion_score: score,
        topic_scores: default_topics()
            .into_iter()
            .map(|topic| TopicScore {
                topic: topic.to_string(),
                score,
            })
            .collect(),
        trend_data: trend_window(score, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawSnippet, SnippetSource};

    fn candidate(text: &str) -> CandidateSnippet {
        CandidateSnippet {
            snippet: RawSnippet::new(text, SnippetSource::News),
            relevance: 10,
        }
    }

    #[test]
    fn empty_text_has_no_hits() {
        assert_eq!(keyword_hits(""), (0, 0));
        assert_eq!(keyword_hits("   "), (0, 0));
    }

    #[test]
    fn punctuation_stripped_from_words() {
        assert_eq!(keyword_hits("Great!"), (1, 0));
        assert_eq!(keyword_hits("(lawsuit)"), (0, 1));
    }

    #[test]
    fn repeated_word_counts_once_per_snippet() {
        assert_eq!(keyword_hits("great great GREAT"), (1, 0));
    }

    #[test]
    fn substrings_do_not_match() {
        // "winter" must not count as "win".
        assert_eq!(keyword_hits("winter finest"), (0, 0));
    }

    #[test]
    fn score_starts_at_midpoint() {
        assert_eq!(fallback_score(0, 0), 50);
        assert_eq!(fallback_score(2, 1), 55);
        assert_eq!(fallback_score(1, 3), 40);
    }

    #[test]
    fn score_clamps_to_band() {
        assert_eq!(fallback_score(40, 0), 75);
        assert_eq!(fallback_score(0, 40), 25);
    }

    #[test]
    fn report_is_low_confidence_and_consistent() {
        let report = fallback_report(&[
            candidate("Acme posts record profit and strong growth"),
            candidate("Acme faces lawsuit"),
            candidate("Acme holds annual meeting"),
        ]);
        // positive hits: record, profit, strong, growth = 4; negative: lawsuit = 1
        assert_eq!(report.score, 65);
        assert_eq!(report.sentiment, Sentiment::Positive);
        assert_eq!(report.confidence_level, ConfidenceLevel::Low);
        assert_eq!(report.positive_count, 1);
        assert_eq!(report.negative_count, 1);
        assert_eq!(report.neutral_count, 1);
        assert_eq!(report.most_positive, "Acme posts record profit and strong growth");
        assert_eq!(report.most_negative, "Acme faces lawsuit");
        assert!(report.topic_scores.iter().all(|t| t.score == 65));
        assert!(report.trend_data.iter().all(|p| p.sentiment == 65));
        assert_eq!(report.brand_awareness_score, 65);
    }

    #[test]
    fn report_without_signals_is_neutral_with_sentinels() {
        let report = fallback_report(&[candidate("Acme holds annual meeting")]);
        assert_eq!(report.score, 50);
        assert_eq!(report.sentiment, Sentiment::Neutral);
        assert_eq!(report.most_positive, NO_POSITIVE);
        assert_eq!(report.most_negative, NO_NEGATIVE);
        assert!(!report.key_insights.is_empty());
        assert!(!report.recommendations.is_empty());
    }
}
