//! Defaults shared by every path that builds an [`AnalysisReport`].

use crate::types::{AnalysisReport, ConfidenceLevel, Sentiment, TopicScore, TrendPoint};

pub const NO_POSITIVE: &str = "No positive feedback found";
pub const NO_NEGATIVE: &str = "No negative feedback found";
pub const NEUTRAL_SCORE: u8 = 50;

/// Day labels of the trend window, oldest first.
pub const TREND_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const MIN_TREND_POINTS: usize = 5;

const TOPICS: [&str; 5] = [
    "Products & Services",
    "Leadership",
    "Financial Performance",
    "Customer Experience",
    "Corporate Responsibility",
];

/// Canonical topic taxonomy.
#[must_use]
pub fn default_topics() -> Vec<&'static str> {
    TOPICS.to_vec()
}

/// A full trend window with the same reading on every day.
#[must_use]
pub fn trend_window(sentiment: u8, mentions: u32) -> Vec<TrendPoint> {
    TREND_DAYS
        .iter()
        .map(|day| TrendPoint {
            day: (*day).to_string(),
            sentiment,
            mentions,
        })
        .collect()
}

/// Report for an entity with no relevant coverage.
#[must_use]
pub fn no_data_report(company: &str) -> AnalysisReport {
    AnalysisReport {
        score: NEUTRAL_SCORE,
        sentiment: Sentiment::Neutral,
        confidence_level: ConfidenceLevel::Low,
        positive_count: 0,
        negative_count: 0,
        neutral_count: 0,
        most_positive: NO_POSITIVE.to_string(),
        most_negative: NO_NEGATIVE.to_string(),
        key_insights: vec![format!(
            "No relevant news or social coverage was found for {company}."
        )],
        recommendations: vec![
            "Increase public visibility through press releases and social media activity."
                .to_string(),
        ],
        brand_awareness_score: NEUTRAL_SCORE,
        market_sentiment_score: NEUTRAL_SCORE,
        public_opinion_score: NEUTRAL_SCORE,
        topic_scores: TOPICS
            .iter()
            .map(|topic| TopicScore {
                topic: (*topic).to_string(),
                score: NEUTRAL_SCORE,
            })
            .collect(),
        trend_data: trend_window(NEUTRAL_SCORE, 0),
    }
}
