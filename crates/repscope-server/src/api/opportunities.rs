//! `POST /api/v1/investment-opportunities`: search stored startup profiles.

use axum::{extract::State, Extension, Json};
use repscope_core::{EntityContext, OpportunityFilter};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct OpportunityMatches {
    pub matches: Vec<EntityContext>,
}

pub(super) async fn search_opportunities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ApiResponse<OpportunityMatches>>, ApiError> {
    let filter = OpportunityFilter::from_fields(&body);
    let matches = state.store.search(&filter).await.map_err(|e| {
        tracing::error!(error = %e, "investment opportunity search failed");
        ApiError::new(req_id.0.clone(), "internal_error", "company search failed")
    })?;

    tracing::info!(
        request_id = %req_id.0,
        matches = matches.len(),
        "investment opportunity search"
    );

    Ok(Json(ApiResponse {
        data: OpportunityMatches { matches },
        meta: ResponseMeta::new(req_id.0),
    }))
}
