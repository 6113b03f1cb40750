//! Conversion of loosely-typed fetch records into [`RawSnippet`]s.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::{RawSnippet, SnippetSource};

/// Articles whose combined text is this short or shorter carry no signal.
const MIN_ARTICLE_CHARS: usize = 20;

fn field<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("").trim()
}

fn timestamp(record: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .map(|key| field(record, key))
        .find(|raw| !raw.is_empty())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

/// Build a news snippet from an article record.
///
/// Text is `"{title}. {description}"`, using `content` when `description` is
/// empty. Missing fields count as empty strings. Returns `None` for articles
/// with [`MIN_ARTICLE_CHARS`] characters or fewer.
#[must_use]
pub fn article_to_snippet(record: &Value) -> Option<RawSnippet> {
    let title = field(record, "title");
    let description = field(record, "description");
    let body = if description.is_empty() {
        field(record, "content")
    } else {
        description
    };

    let text = format!("{title}. {body}");
    let text = text.trim().trim_start_matches('.').trim().to_string();
    if text.chars().count() <= MIN_ARTICLE_CHARS {
        return None;
    }

    Some(RawSnippet {
        text,
        source: SnippetSource::News,
        timestamp: timestamp(record, &["publishedAt", "published_at"]),
    })
}

/// Build a social snippet from a post record. Retweets and empty posts are skipped.
#[must_use]
pub fn post_to_snippet(record: &Value) -> Option<RawSnippet> {
    let text = field(record, "text");
    if text.is_empty() || text.starts_with("RT @") {
        return None;
    }

    Some(RawSnippet {
        text: text.to_string(),
        source: SnippetSource::Social,
        timestamp: timestamp(record, &["created_at"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn article_joins_title_and_description() {
        let snippet = article_to_snippet(&json!({
            "title": "Acme opens new plant",
            "description": "The facility adds 300 jobs.",
            "content": "ignored",
            "publishedAt": "2025-03-04T10:00:00Z"
        }))
        .expect("snippet");
        assert_eq!(snippet.text, "Acme opens new plant. The facility adds 300 jobs.");
        assert_eq!(snippet.source, SnippetSource::News);
        assert_eq!(
            snippet.timestamp.map(|t| t.to_rfc3339()),
            Some("2025-03-04T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn article_uses_content_when_description_missing() {
        let snippet = article_to_snippet(&json!({
            "title": "Acme opens new plant",
            "description": null,
            "content": "Body text here",
            "published_at": "2025-03-04 10:00:00 UTC"
        }))
        .expect("snippet");
        assert_eq!(snippet.text, "Acme opens new plant. Body text here");
        // Not RFC 3339, so no timestamp rather than a failure.
        assert!(snippet.timestamp.is_none());
    }

    #[test]
    fn short_article_is_dropped() {
        assert!(article_to_snippet(&json!({ "title": "Acme" })).is_none());
        assert!(article_to_snippet(&json!({})).is_none());
    }

    #[test]
    fn post_keeps_text_and_skips_retweets() {
        let snippet = post_to_snippet(&json!({
            "text": "Loving my new Acme phone",
            "created_at": "2025-03-04T10:00:00.000Z"
        }))
        .expect("snippet");
        assert_eq!(snippet.source, SnippetSource::Social);
        assert!(snippet.timestamp.is_some());

        assert!(post_to_snippet(&json!({ "text": "RT @acme: big news" })).is_none());
        assert!(post_to_snippet(&json!({ "text": "  " })).is_none());
    }
}
