//! Snippet collection from external sources.

mod news;
mod records;

pub use news::{NewsClient, NewsProvider};
pub use records::{article_to_snippet, post_to_snippet};

use futures::future::join_all;
use repscope_core::EntityContext;

use crate::types::RawSnippet;

/// Collect news snippets about the entity from every enabled provider.
///
/// Queries the company name and, when known, the leadership name against each
/// provider concurrently. Individual failures are logged and skipped; the
/// result is empty if every request fails.
pub async fn collect_news_snippets(client: &NewsClient, ctx: &EntityContext) -> Vec<RawSnippet> {
    let mut queries = vec![ctx.name()];
    if let Some(leader) = ctx.leadership() {
        queries.push(leader);
    }

    let providers = client.enabled_providers();
    if providers.is_empty() {
        tracing::warn!(company = ctx.name(), "no news provider configured; skipping news fetch");
        return Vec::new();
    }

    let requests = providers.iter().flat_map(|&provider| {
        queries.iter().map(move |&query| async move {
            (provider, query, client.fetch(provider, query).await)
        })
    });

    let mut snippets = Vec::new();
    for (provider, query, result) in join_all(requests).await {
        match result {
            Ok(articles) => {
                let before = snippets.len();
                snippets.extend(articles.iter().filter_map(article_to_snippet));
                tracing::debug!(
                    source = provider.name(),
                    query,
                    articles = articles.len(),
                    kept = snippets.len() - before,
                    "collected news articles"
                );
            }
            Err(e) => {
                tracing::warn!(
                    source = provider.name(),
                    query,
                    error = %e,
                    "news fetch failed"
                );
            }
        }
    }

    snippets
}
