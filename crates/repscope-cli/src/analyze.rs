//! `analyze` command: one pipeline run from flags and an optional records file.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use repscope_core::{AppConfig, EntityContext};
use repscope_sentiment::sources::{article_to_snippet, post_to_snippet};
use repscope_sentiment::{
    collect_news_snippets, ChatCompletionClient, NewsClient, RawSnippet, ReasoningConfig,
    ReportPipeline,
};
use serde::Deserialize;
use serde_json::Value;

use crate::AnalyzeArgs;

/// On-disk shape of `--input`. Both arrays are optional.
#[derive(Debug, Default, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    articles: Vec<Value>,
    #[serde(default)]
    posts: Vec<Value>,
}

/// Read a records file and convert every usable record into a snippet.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object with
/// array-valued `articles`/`posts`.
pub(crate) fn load_records(path: &Path) -> anyhow::Result<Vec<RawSnippet>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {}", path.display()))?;
    let records: RecordsFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid records file {}", path.display()))?;

    let snippets: Vec<RawSnippet> = records
        .articles
        .iter()
        .filter_map(article_to_snippet)
        .chain(records.posts.iter().filter_map(post_to_snippet))
        .collect();

    tracing::debug!(
        path = %path.display(),
        articles = records.articles.len(),
        posts = records.posts.len(),
        kept = snippets.len(),
        "loaded records file"
    );
    Ok(snippets)
}

fn build_entity(args: &AnalyzeArgs) -> anyhow::Result<EntityContext> {
    Ok(EntityContext::new(
        &args.company,
        args.ceo.as_deref(),
        args.sector.as_deref(),
        args.country.as_deref(),
    )?)
}

/// Run one analysis and print the outcome as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error for a blank company name, an unreadable records file, or
/// a client that cannot be constructed. Reasoning and news failures are not
/// errors: they surface in the printed outcome or the log.
pub(crate) async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let ctx = build_entity(args)?;

    let mut snippets = match &args.input {
        Some(path) => load_records(path)?,
        None => Vec::new(),
    };

    if args.fetch_news {
        let news = NewsClient::new(config)?;
        snippets.extend(collect_news_snippets(&news, &ctx).await);
    }

    if snippets.is_empty() {
        tracing::warn!(
            company = ctx.name(),
            "no snippets supplied; pass --input or --fetch-news for a real analysis"
        );
    }

    let reasoning = ChatCompletionClient::new(&ReasoningConfig::from_app_config(config))?;
    let pipeline = ReportPipeline::new(
        Arc::new(reasoning),
        Duration::from_secs(config.llm_timeout_secs),
    );
    let outcome = pipeline.analyze(&ctx, snippets).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
