mod analyze;
mod opportunities;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use repscope_core::CompanyStore;
use repscope_sentiment::{NewsClient, ReportPipeline};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: ReportPipeline,
    pub news: Arc<NewsClient>,
    pub store: Arc<dyn CompanyStore>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.error.code == "validation_error" {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze::analyze_company))
        .route(
            "/api/v1/investment-opportunities",
            post(opportunities::search_opportunities),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use repscope_core::{AppConfig, Environment, InMemoryCompanyStore};
    use repscope_sentiment::{ReasoningError, ReasoningService, ReportRequest};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Replies with a fixed completion, or fails when `reply` is `None`.
    /// Counts every call.
    pub(crate) struct StubService {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubService {
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningService for StubService {
        async fn complete(&self, _request: &ReportRequest) -> Result<String, ReasoningError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .map(str::to_string)
                .ok_or_else(|| ReasoningError::ServiceUnavailable("stub offline".to_string()))
        }
    }

    /// App state plus handles on its collaborators for assertions.
    pub(crate) struct TestHarness {
        pub state: AppState,
        pub service: Arc<StubService>,
        pub store: Arc<InMemoryCompanyStore>,
    }

    pub(crate) fn harness(reply: Option<&'static str>) -> TestHarness {
        // No news keys: collection is a no-op and never touches the network.
        let config = AppConfig {
            env: Environment::Test,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            log_level: "debug".to_string(),
            llm_base_url: "http://127.0.0.1:9".to_string(),
            llm_api_key: None,
            llm_model: "test/model".to_string(),
            llm_timeout_secs: 5,
            llm_temperature: 0.3,
            llm_max_tokens: 500,
            newsapi_key: None,
            gnews_api_key: None,
            news_timeout_secs: 5,
            news_page_size: 10,
        };
        let service = Arc::new(StubService {
            reply,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(InMemoryCompanyStore::new());
        let state = AppState {
            pipeline: ReportPipeline::new(service.clone(), Duration::from_secs(5)),
            news: Arc::new(NewsClient::new(&config).expect("news client")),
            store: store.clone(),
        };
        TestHarness {
            state,
            service,
            store,
        }
    }

    pub(crate) fn test_state(reply: Option<&'static str>) -> AppState {
        harness(reply).state
    }

    pub(crate) async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_other_codes_map_to_internal_error() {
        for code in ["internal_error", "boom"] {
            let response = ApiError::new("req-1", code, "unexpected").into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn health_returns_ok_with_meta() {
        let app = build_app(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let app = build_app(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
        let json = json_body(response).await;
        assert_eq!(json["meta"]["request_id"], "req-42");
    }

    #[tokio::test]
    async fn missing_request_id_gets_generated() {
        let app = build_app(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .expect("generated id");
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
