//! Coerces an untrusted reasoning-service object into a conformant report.
//!
//! [`normalize_report`] is total: every malformed or missing field has a
//! defined default, so it never fails.

use serde_json::{Map, Value};

use crate::report::{
    default_topics, trend_window, MIN_TREND_POINTS, NEUTRAL_SCORE, NO_NEGATIVE, NO_POSITIVE,
    TREND_DAYS,
};
use crate::types::{AnalysisReport, ConfidenceLevel, Sentiment, TopicScore, TrendPoint};

const DEFAULT_INSIGHT: &str = "No notable patterns were identified in the available coverage.";
const DEFAULT_RECOMMENDATION: &str =
    "Continue monitoring news and social media coverage for emerging trends.";
const MAX_LIST_ITEMS: usize = 5;
const MAX_TOPICS: usize = 10;

/// Build a report from the parsed service object.
///
/// Rules: `score` clamped to 0–100 (50 when absent or non-numeric);
/// `sentiment` recomputed from the clamped score, the service's own label is
/// ignored; counts coerced to non-negative integers; topic scores clamped
/// (50 when missing); everything else defaulted.
#[must_use]
pub fn normalize_report(raw: &Map<String, Value>) -> AnalysisReport {
    let score = score_field(raw.get("score"), NEUTRAL_SCORE);

    AnalysisReport {
        score,
        sentiment: Sentiment::from_score(score),
        confidence_level: confidence(raw.get("confidence_level")),
        positive_count: count(raw.get("positive_count")),
        negative_count: count(raw.get("negative_count")),
        neutral_count: count(raw.get("neutral_count")),
        most_positive: text(raw.get("most_positive")).unwrap_or_else(|| NO_POSITIVE.to_string()),
        most_negative: text(raw.get("most_negative")).unwrap_or_else(|| NO_NEGATIVE.to_string()),
        key_insights: string_list(raw.get("key_insights"), DEFAULT_INSIGHT),
        recommendations: string_list(raw.get("recommendations"), DEFAULT_RECOMMENDATION),
        brand_awareness_score: score_field(raw.get("brand_awareness_score"), NEUTRAL_SCORE),
        market_sentiment_score: score_field(raw.get("market_sentiment_score"), NEUTRAL_SCORE),
        public_opinion_score: score_field(raw.get("public_opinion_score"), NEUTRAL_SCORE),
        topic_scores: topics(raw.get("topic_scores")),
        trend_data: trend(raw.get("trend_data"), score),
    }
}

/// Numeric reading of a JSON value. Numeric strings are accepted.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_field(value: Option<&Value>, default: u8) -> u8 {
    // Clamped to 0..=100 first, so the cast is lossless.
    number(value).map_or(default, |n| n.round().clamp(0.0, 100.0) as u8)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: Option<&Value>) -> u32 {
    match number(value) {
        Some(n) if n > 0.0 => n.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn confidence(value: Option<&Value>) -> ConfidenceLevel {
    match value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
        .as_deref()
    {
        Some("low") => ConfidenceLevel::Low,
        Some("high") => ConfidenceLevel::High,
        _ => ConfidenceLevel::Medium,
    }
}

fn string_list(value: Option<&Value>, default: &str) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| text(Some(item)))
            .take(MAX_LIST_ITEMS)
            .collect(),
        Some(Value::String(_)) => text(value).into_iter().collect(),
        _ => Vec::new(),
    };

    if items.is_empty() {
        vec![default.to_string()]
    } else {
        items
    }
}

fn topics(value: Option<&Value>) -> Vec<TopicScore> {
    let parsed: Vec<TopicScore> = match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let obj = entry.as_object()?;
                let topic = text(obj.get("topic")).or_else(|| text(obj.get("name")))?;
                Some(TopicScore {
                    topic,
                    score: score_field(obj.get("score"), NEUTRAL_SCORE),
                })
            })
            .take(MAX_TOPICS)
            .collect(),
        // Some models answer with a `{ "topic": score }` map instead of a list.
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(topic, _)| !topic.trim().is_empty())
            .map(|(topic, score)| TopicScore {
                topic: topic.trim().to_string(),
                score: score_field(Some(score), NEUTRAL_SCORE),
            })
            .take(MAX_TOPICS)
            .collect(),
        _ => Vec::new(),
    };

    if parsed.is_empty() {
        default_topics()
            .into_iter()
            .map(|topic| TopicScore {
                topic: topic.to_string(),
                score: NEUTRAL_SCORE,
            })
            .collect()
    } else {
        parsed
    }
}

/// Service trend points, truncated to a week and padded to at least
/// [`MIN_TREND_POINTS`] with the report score.
fn trend(value: Option<&Value>, report_score: u8) -> Vec<TrendPoint> {
    let Some(Value::Array(entries)) = value else {
        return trend_window(report_score, 0);
    };

    let mut points: Vec<TrendPoint> = entries
        .iter()
        .filter_map(Value::as_object)
        .take(TREND_DAYS.len())
        .enumerate()
        .map(|(idx, obj)| TrendPoint {
            day: text(obj.get("day"))
                .or_else(|| text(obj.get("date")))
                .unwrap_or_else(|| TREND_DAYS[idx].to_string()),
            sentiment: score_field(
                obj.get("sentiment").or_else(|| obj.get("score")),
                report_score,
            ),
            mentions: count(obj.get("mentions")),
        })
        .collect();

    if points.is_empty() {
        return trend_window(report_score, 0);
    }

    while points.len() < MIN_TREND_POINTS {
        points.push(TrendPoint {
            day: TREND_DAYS[points.len()].to_string(),
            sentiment: report_score,
            mentions: 0,
        });
    }

    points
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
