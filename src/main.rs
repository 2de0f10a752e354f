use chat_relay::app::{create_app, init_tracing};
use chat_relay::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    init_tracing();

    info!("Starting chat relay service...");

    // Load configuration
    let config = Config::from_env();
    info!(
        "Configuration loaded: listening on {}, groq configured: {}",
        config.bind_address(),
        config.groq_api_key.is_some()
    );

    // Create the application
    let app = create_app(&config);

    // Create TCP listener
    let listener = match tokio::net::TcpListener::bind(&config.bind_address()).await {
        Ok(listener) => {
            info!("Server running on {}", config.server_url());
            info!("Chat page: GET /");
            info!("Health check: GET /api/health");
            info!("Chat endpoint: POST /api/chat");
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Server starting...");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    } else {
        info!("Server shutdown gracefully");
    }
}
