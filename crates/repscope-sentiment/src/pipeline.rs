//! Pipeline orchestration: filter, compose, one reasoning call, validate or fall back.

use std::sync::Arc;
use std::time::Duration;

use repscope_core::EntityContext;

use crate::error::ReasoningError;
use crate::fallback::fallback_report;
use crate::filter::filter_relevant;
use crate::normalize::normalize_report;
use crate::prompt::compose_request;
use crate::reasoning::{request_report, ReasoningService};
use crate::report::no_data_report;
use crate::types::{AnalysisOutcome, RawSnippet, ReportStatus};

/// Runs one analysis per call. Holds no per-request state, so one instance can
/// serve concurrent requests.
#[derive(Clone)]
pub struct ReportPipeline {
    service: Arc<dyn ReasoningService>,
    timeout: Duration,
}

impl ReportPipeline {
    /// `timeout` bounds the reasoning call regardless of the service's own
    /// transport timeout.
    #[must_use]
    pub fn new(service: Arc<dyn ReasoningService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Analyze `snippets` for `ctx`.
    ///
    /// 1. Filter and rank the snippets.
    /// 2. No candidates: return a `no-data` report without calling the service.
    /// 3. Compose the request and make exactly one reasoning call.
    /// 4. On success, normalize the returned object (`success`).
    /// 5. On any service failure, compute the keyword fallback (`fallback`).
    ///
    /// Never fails: every path produces a conformant report.
    pub async fn analyze(&self, ctx: &EntityContext, snippets: Vec<RawSnippet>) -> AnalysisOutcome {
        let received = snippets.len();
        let candidates = filter_relevant(snippets, ctx);

        if candidates.is_empty() {
            tracing::info!(
                company = ctx.name(),
                received,
                "no relevant snippets; returning neutral no-data report"
            );
            return AnalysisOutcome {
                status: ReportStatus::NoData,
                items_analyzed: 0,
                company_info: ctx.clone(),
                analysis_result: no_data_report(ctx.name()),
                fallback_reason: None,
            };
        }

        let request = compose_request(ctx, &candidates);
        let items_analyzed = request.snippet_count;
        tracing::debug!(
            company = ctx.name(),
            candidates = candidates.len(),
            embedded = items_analyzed,
            prompt_chars = request.prompt.len(),
            "composed reasoning request"
        );

        let result = tokio::time::timeout(
            self.timeout,
            request_report(self.service.as_ref(), &request),
        )
        .await
        .unwrap_or_else(|_| {
            Err(ReasoningError::ServiceUnavailable(format!(
                "no response within {}ms",
                self.timeout.as_millis()
            )))
        });

        match result {
            Ok(raw) => {
                let report = normalize_report(&raw);
                tracing::info!(
                    company = ctx.name(),
                    items = items_analyzed,
                    score = report.score,
                    "analysis complete"
                );
                AnalysisOutcome {
                    status: ReportStatus::Success,
                    items_analyzed,
                    company_info: ctx.clone(),
                    analysis_result: report,
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    company = ctx.name(),
                    error = %e,
                    "reasoning service failed; using keyword fallback"
                );
                let embedded = &candidates[..items_analyzed];
                AnalysisOutcome {
                    status: ReportStatus::Fallback,
                    items_analyzed,
                    company_info: ctx.clone(),
                    analysis_result: fallback_report(embedded),
                    fallback_reason: Some(e.to_string()),
                }
            }
        }
    }
}
