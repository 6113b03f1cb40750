//! `POST /api/v1/analyze`: build the entity, store startups, gather snippets,
//! run the pipeline.

use axum::{extract::State, Extension, Json};
use repscope_core::EntityContext;
use repscope_sentiment::sources::{article_to_snippet, post_to_snippet};
use repscope_sentiment::{collect_news_snippets, AnalysisOutcome, RawSnippet};
use serde_json::{Map, Value};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Snippets supplied inline with the request. `articles` use the news record
/// shape, `posts` the social one; anything that isn't an array is ignored.
fn inline_snippets(body: &Map<String, Value>) -> Vec<RawSnippet> {
    records(body, "articles")
        .iter()
        .filter_map(article_to_snippet)
        .chain(records(body, "posts").iter().filter_map(post_to_snippet))
        .collect()
}

fn records<'a>(body: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

pub(super) async fn analyze_company(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ApiResponse<AnalysisOutcome>>, ApiError> {
    let ctx = EntityContext::from_fields(&body)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    if ctx.is_startup() {
        match state.store.insert_if_absent(&ctx).await {
            Ok(inserted) => {
                tracing::debug!(company = ctx.name(), inserted, "startup profile stored");
            }
            Err(e) => {
                tracing::warn!(
                    company = ctx.name(),
                    error = %e,
                    "failed to store startup profile"
                );
            }
        }
    }

    let mut snippets = inline_snippets(&body);
    let inline = snippets.len();
    snippets.extend(collect_news_snippets(&state.news, &ctx).await);

    tracing::info!(
        request_id = %req_id.0,
        company = ctx.name(),
        inline,
        collected = snippets.len() - inline,
        "starting analysis"
    );

    let outcome = state.pipeline.analyze(&ctx, snippets).await;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
