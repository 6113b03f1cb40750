//! Reputation analysis pipeline for repscope.
//!
//! Filters collected news and social snippets for relevance to a company,
//! asks a reasoning service for a structured report, and normalizes the
//! answer into a guaranteed shape. When the service is unavailable or its
//! output is unusable, a keyword analysis produces the same shape instead.

pub mod error;
pub mod fallback;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod reasoning;
pub mod report;
pub mod sources;
pub mod types;

pub use error::{ReasoningError, SourceError};
pub use fallback::fallback_report;
pub use filter::{filter_relevant, sector_keywords};
pub use normalize::normalize_report;
pub use pipeline::ReportPipeline;
pub use prompt::{compose_request, ReportRequest};
pub use reasoning::{
    extract_json_payload, request_report, ChatCompletionClient, ReasoningConfig,
    ReasoningService,
};
pub use sources::{collect_news_snippets, NewsClient};
pub use types::{
    AnalysisOutcome, AnalysisReport, CandidateSnippet, ConfidenceLevel, RawSnippet,
    ReportStatus, Sentiment, SnippetSource, TopicScore, TrendPoint,
};
