use chrono::{DateTime, Utc};
use repscope_core::EntityContext;
use serde::{Deserialize, Serialize};

/// Where a snippet was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetSource {
    News,
    Social,
}

impl std::fmt::Display for SnippetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnippetSource::News => write!(f, "news"),
            SnippetSource::Social => write!(f, "social"),
        }
    }
}

/// A single piece of text collected about the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnippet {
    pub text: String,
    pub source: SnippetSource,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawSnippet {
    #[must_use]
    pub fn new(text: impl Into<String>, source: SnippetSource) -> Self {
        Self {
            text: text.into(),
            source,
            timestamp: None,
        }
    }
}

/// A snippet that passed the relevance filter.
///
/// `relevance` is used for ranking only and never forwarded to the reasoning
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSnippet {
    pub snippet: RawSnippet,
    pub relevance: u32,
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Collapse a 0–100 score into the three-way label.
    ///
    /// 0–45 is negative, 46–55 neutral, 56–100 positive. Values above 100 are
    /// treated as 100.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match SentimentBand::from_score(score) {
            SentimentBand::VeryNegative | SentimentBand::Negative => Sentiment::Negative,
            SentimentBand::Neutral => Sentiment::Neutral,
            SentimentBand::Positive | SentimentBand::VeryPositive => Sentiment::Positive,
        }
    }
}

/// Five-band reading of a score, as described to the reasoning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentBand {
    /// Every band with its inclusive score range, lowest first.
    pub const ALL: [(SentimentBand, u8, u8); 5] = [
        (SentimentBand::VeryNegative, 0, 30),
        (SentimentBand::Negative, 31, 45),
        (SentimentBand::Neutral, 46, 55),
        (SentimentBand::Positive, 56, 70),
        (SentimentBand::VeryPositive, 71, 100),
    ];

    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => SentimentBand::VeryNegative,
            31..=45 => SentimentBand::Negative,
            46..=55 => SentimentBand::Neutral,
            56..=70 => SentimentBand::Positive,
            _ => SentimentBand::VeryPositive,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SentimentBand::VeryNegative => "very negative",
            SentimentBand::Negative => "negative",
            SentimentBand::Neutral => "neutral",
            SentimentBand::Positive => "positive",
            SentimentBand::VeryPositive => "very positive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub sentiment: u8,
    pub mentions: u32,
}

/// The guaranteed-shape report returned for every analysis, whichever path
/// produced it. All scores are within 0–100 and `sentiment` always agrees
/// with `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: u8,
    pub sentiment: Sentiment,
    pub confidence_level: ConfidenceLevel,
    pub positive_count: u32,
    pub negative_count: u32,
    pub neutral_count: u32,
    pub most_positive: String,
    pub most_negative: String,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub brand_awareness_score: u8,
    pub market_sentiment_score: u8,
    pub public_opinion_score: u8,
    pub topic_scores: Vec<TopicScore>,
    pub trend_data: Vec<TrendPoint>,
}

/// Which path produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    /// Reasoning service output, validated and normalized.
    Success,
    /// Keyword analysis after the reasoning service failed.
    Fallback,
    /// Nothing relevant survived filtering.
    NoData,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Success => write!(f, "success"),
            ReportStatus::Fallback => write!(f, "fallback"),
            ReportStatus::NoData => write!(f, "no-data"),
        }
    }
}

/// Pipeline result handed back to callers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub status: ReportStatus,
    /// Number of snippets actually sent for analysis.
    pub items_analyzed: usize,
    pub company_info: EntityContext,
    pub analysis_result: AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
