//! Hospital helpline chatbot
//!
//! A small axum server exposing one chat endpoint backed by a pluggable
//! response strategy: an offline rule table, or a delegated call to an
//! external completion service.

mod api;
mod bot;
mod config;

use api::{create_router, AppState};
use bot::{Bot, LoggingBot, OpenAiBot, RuleBot};
use config::{AppConfig, BotMode};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpline=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();

    // Pick the response strategy
    let strategy: Arc<dyn Bot> = match config.resolved_mode() {
        BotMode::Assistant => {
            tracing::info!(model = %config.model, "Using delegated completion strategy");
            Arc::new(OpenAiBot::new(
                config.upstream_api_key(),
                config.model.clone(),
                config.gateway.as_deref(),
            ))
        }
        BotMode::Offline => {
            if config.mode.is_none() {
                tracing::warn!(
                    "No OPENAI_API_KEY or LLM_GATEWAY configured, using the offline rule table"
                );
            } else {
                tracing::info!("Using the offline rule table strategy");
            }
            Arc::new(RuleBot)
        }
    };
    let bot: Arc<dyn Bot> = Arc::new(LoggingBot::new(strategy));

    // Create application state
    let state = AppState::new(bot);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Helpline server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
