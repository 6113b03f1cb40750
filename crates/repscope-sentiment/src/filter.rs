//! Relevance scoring, near-duplicate suppression and truncation of raw snippets.

use std::collections::HashSet;

use repscope_core::EntityContext;
use sha2::{Digest, Sha256};

use crate::types::{CandidateSnippet, RawSnippet};

/// Number of leading characters that make up a snippet fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 100;
/// Minimum cumulative relevance for a snippet to be kept.
pub const RELEVANCE_THRESHOLD: u32 = 5;
/// Maximum number of candidates returned by [`filter_relevant`].
pub const MAX_CANDIDATES: usize = 25;

const NAME_MATCH: u32 = 10;
const LEADERSHIP_MATCH: u32 = 8;
const SECTOR_MATCH: u32 = 3;
const LONG_TEXT: u32 = 2;
const LONG_TEXT_CHARS: usize = 100;

const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technology",
        &["tech", "software", "ai", "digital", "innovation"],
    ),
    (
        "aviation",
        &["airline", "flight", "aircraft", "airport", "aviation"],
    ),
    (
        "finance",
        &["bank", "financial", "money", "investment", "credit"],
    ),
    (
        "healthcare",
        &["health", "medical", "hospital", "pharma", "medicine"],
    ),
    (
        "retail",
        &["store", "shopping", "customer", "sales", "retail"],
    ),
    ("energy", &["energy", "oil", "gas", "renewable", "power"]),
    (
        "automotive",
        &["car", "vehicle", "auto", "transport", "mobility"],
    ),
];

/// Keywords for a sector, looked up case-insensitively. Unknown sectors have none.
#[must_use]
pub fn sector_keywords(sector: &str) -> &'static [&'static str] {
    let key = sector.trim().to_lowercase();
    SECTOR_KEYWORDS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(&[], |(_, keywords)| *keywords)
}

/// Fingerprint of the first [`FINGERPRINT_PREFIX_CHARS`] characters of the
/// lower-cased text.
///
/// Snippets sharing a prefix collide even when their tails differ.
#[must_use]
pub fn fingerprint(text: &str) -> [u8; 32] {
    let prefix: String = text
        .to_lowercase()
        .chars()
        .take(FINGERPRINT_PREFIX_CHARS)
        .collect();
    Sha256::digest(prefix.as_bytes()).into()
}

/// Additive relevance score of one snippet against the entity.
///
/// All substring tests run against the lower-cased text.
#[must_use]
pub fn relevance_score(text: &str, ctx: &EntityContext) -> u32 {
    let text_lower = text.to_lowercase();
    let mut score = 0;

    if text_lower.contains(&ctx.name_lower()) {
        score += NAME_MATCH;
    }

    if let Some(leader) = ctx.leadership_lower() {
        if text_lower.contains(&leader) {
            score += LEADERSHIP_MATCH;
        }
    }

    let keywords = ctx.sector().map_or(&[][..], sector_keywords);
    if keywords.iter().any(|k| text_lower.contains(k)) {
        score += SECTOR_MATCH;
    }

    if text.chars().count() > LONG_TEXT_CHARS {
        score += LONG_TEXT;
    }

    score
}

/// Turn a raw batch into a ranked, bounded candidate set.
///
/// 1. Drop snippets whose [`fingerprint`] was already seen (first arrival wins).
/// 2. Score each survivor with [`relevance_score`] and keep those at or above
///    [`RELEVANCE_THRESHOLD`].
/// 3. Stable-sort by score, highest first, and keep [`MAX_CANDIDATES`].
///
/// An empty batch yields an empty candidate set.
#[must_use]
pub fn filter_relevant(snippets: Vec<RawSnippet>, ctx: &EntityContext) -> Vec<CandidateSnippet> {
    let total = snippets.len();
    let mut seen: HashSet<[u8; 32]> = HashSet::with_capacity(total);
    let mut duplicates = 0usize;

    let mut candidates: Vec<CandidateSnippet> = snippets
        .into_iter()
        .filter(|snippet| {
            let fresh = seen.insert(fingerprint(&snippet.text));
            if !fresh {
                duplicates += 1;
            }
            fresh
        })
        .filter_map(|snippet| {
            let relevance = relevance_score(&snippet.text, ctx);
            (relevance >= RELEVANCE_THRESHOLD).then_some(CandidateSnippet { snippet, relevance })
        })
        .collect();

    // `sort_by` is stable, so equal scores keep arrival order.
    candidates.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    let relevant = candidates.len();
    candidates.truncate(MAX_CANDIDATES);

    tracing::debug!(
        company = ctx.name(),
        total,
        duplicates,
        relevant,
        kept = candidates.len(),
        "filtered snippets"
    );

    candidates
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
