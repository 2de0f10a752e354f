use crate::handlers::{chat_handler, health_check, index};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_check))
}
