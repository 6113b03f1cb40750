//! Renders the entity and its candidate snippets into one reasoning request.

use std::fmt::Write as _;

use repscope_core::EntityContext;

use crate::report::{default_topics, TREND_DAYS};
use crate::types::{CandidateSnippet, SentimentBand};

/// Maximum snippets embedded in one request.
pub const MAX_PROMPT_SNIPPETS: usize = 20;

/// Marker placed between snippets. Stripped from snippet text before embedding
/// so it can never occur inside an item.
pub const SNIPPET_SEPARATOR: &str = "<<<END_OF_ITEM>>>";

/// A composed request for the reasoning service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub prompt: String,
    /// Number of snippets embedded in `prompt`.
    pub snippet_count: usize,
}

/// Compose the structured-output request for `ctx` from at most
/// [`MAX_PROMPT_SNIPPETS`] candidates, in candidate order.
#[must_use]
pub fn compose_request(ctx: &EntityContext, candidates: &[CandidateSnippet]) -> ReportRequest {
    let embedded = &candidates[..candidates.len().min(MAX_PROMPT_SNIPPETS)];

    let mut prompt = String::with_capacity(4096);
    prompt.push_str(
        "You are a reputation analysis engine for businesses. Evaluate the public \
         sentiment and reputation of the company below using only the numbered items \
         of news coverage and social media posts that follow.\n\n",
    );

    prompt.push_str("## Company\n");
    push_field(&mut prompt, "Name", Some(ctx.name()));
    push_field(&mut prompt, "CEO", ctx.leadership());
    push_field(&mut prompt, "Sector", ctx.sector());
    push_field(&mut prompt, "Country", ctx.country());
    push_field(
        &mut prompt,
        "Public company",
        Some(if ctx.is_public() { "yes" } else { "no" }),
    );
    push_field(
        &mut prompt,
        "Startup",
        Some(if ctx.is_startup() { "yes" } else { "no" }),
    );

    let _ = write!(
        prompt,
        "\n## Items ({} total, each ends with the line {SNIPPET_SEPARATOR})\n",
        embedded.len()
    );
    for (idx, candidate) in embedded.iter().enumerate() {
        let snippet = &candidate.snippet;
        let _ = write!(prompt, "[{}] source={}", idx + 1, snippet.source);
        if let Some(ts) = snippet.timestamp {
            let _ = write!(prompt, " date={}", ts.format("%Y-%m-%d"));
        }
        prompt.push('\n');
        prompt.push_str(snippet.text.replace(SNIPPET_SEPARATOR, " ").trim());
        prompt.push('\n');
        prompt.push_str(SNIPPET_SEPARATOR);
        prompt.push('\n');
    }

    prompt.push_str("\n## Score scale\n");
    prompt.push_str("score is an integer from 0 (most negative) to 100 (most positive):\n");
    for (band, lo, hi) in SentimentBand::ALL {
        let _ = writeln!(prompt, "- {lo}-{hi}: {}", band.label());
    }
    prompt.push_str(
        "The sentiment field MUST agree with score: \"negative\" for 0-45, \
         \"neutral\" for 46-55, \"positive\" for 56-100.\n",
    );

    prompt.push_str("\n## Output\n");
    prompt.push_str(
        "Respond with a single JSON object and nothing else. Use exactly these keys:\n",
    );
    prompt.push_str(&output_schema());

    ReportRequest {
        prompt,
        snippet_count: embedded.len(),
    }
}

fn push_field(prompt: &mut String, label: &str, value: Option<&str>) {
    let _ = writeln!(prompt, "- {label}: {}", value.unwrap_or("unknown"));
}

fn output_schema() -> String {
    let topics = default_topics()
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let days = TREND_DAYS.join(", ");

    format!(
        r#"{{
  "score": integer 0-100,
  "sentiment": "positive" | "negative" | "neutral",
  "confidence_level": "low" | "medium" | "high",
  "positive_count": integer >= 0, number of clearly positive items,
  "negative_count": integer >= 0, number of clearly negative items,
  "neutral_count": integer >= 0, number of neutral items,
  "most_positive": the most favorable item, quoted verbatim,
  "most_negative": the most concerning item, quoted verbatim,
  "key_insights": [2-3 short observations],
  "recommendations": [2-3 short actionable suggestions],
  "brand_awareness_score": integer 0-100,
  "market_sentiment_score": integer 0-100,
  "public_opinion_score": integer 0-100,
  "topic_scores": [{{"topic": one of {topics}, "score": integer 0-100}}],
  "trend_data": [{{"day": one of {days}, "sentiment": integer 0-100, "mentions": integer >= 0}}] with 7 entries
}}
"#
    )
}
