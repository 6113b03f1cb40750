mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use repscope_core::InMemoryCompanyStore;
use repscope_sentiment::{ChatCompletionClient, NewsClient, ReasoningConfig, ReportPipeline};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = repscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.llm_api_key.is_none() {
        tracing::warn!(
            "REPSCOPE_LLM_API_KEY not set; every analysis will use the keyword fallback"
        );
    }

    let reasoning = ChatCompletionClient::new(&ReasoningConfig::from_app_config(&config))?;
    let pipeline = ReportPipeline::new(
        Arc::new(reasoning),
        Duration::from_secs(config.llm_timeout_secs),
    );
    let news = Arc::new(NewsClient::new(&config)?);

    let store = Arc::new(InMemoryCompanyStore::new());

    let app = build_app(AppState {
        pipeline,
        news,
        store,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        model = %config.llm_model,
        "repscope-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
