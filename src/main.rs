//! Chat relay server
//!
//! Accepts chat requests from clients, forwards them to the completion
//! provider and answers with a uniform envelope.

use relay_chat::api::{create_router, AppState};
use relay_chat::llm::{LlmConfig, LlmService, LoggingService, OpenAIService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 5001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let port: u16 = std::env::var("CHAT_RELAY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let llm_config = LlmConfig::from_env();
    if llm_config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set. Chat requests will fail until it is configured.");
    }

    let provider: Arc<dyn LlmService> = Arc::new(OpenAIService::new(&llm_config)?);
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(provider));
    tracing::info!(
        model = %llm.model_id(),
        base_url = %llm_config.base_url,
        max_tokens = llm_config.sampling.max_tokens,
        temperature = llm_config.sampling.temperature,
        "Completion provider configured"
    );

    let state = AppState::new(llm, llm_config.sampling);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Chat relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
