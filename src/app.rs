use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::groq::{CompletionHandle, GroqClient};
use crate::routes::create_routes;

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info,tower_http=debug,axum::rejection=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(config: &Config) -> Router {
    info!("Initializing application router");

    // The client handle is built once here and never reassigned; handlers
    // share it read-only through the extension layer.
    let completion: CompletionHandle = match &config.groq_api_key {
        Some(key) => {
            info!("Groq client initialized successfully");
            Some(Arc::new(GroqClient::new(key.clone())))
        }
        None => {
            warn!("GROQ_API_KEY is not set; the chat endpoint will report the AI service as unavailable");
            None
        }
    };

    Router::new()
        .merge(create_routes())
        .layer(Extension(completion))
        .layer(CorsLayer::permissive())
}
