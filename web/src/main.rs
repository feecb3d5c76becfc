//! Ten Web Server
//!
//! Stateless HTTP front end for the Ten engine. Every move request carries
//! the full position, so the server keeps no sessions.
//! Endpoints:
//! - GET  /health    - Health check
//! - GET  /ten/board - Initial board payload
//! - POST /ten/move  - Human move, answered with the AI reply

use axum::{
    routing::{get, post},
    Router,
};
use engine_config::load_config;
use games_ten::ProtocolConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod handlers;
mod types;

use handlers::{health, initial_board, make_move};

/// Shared application state
pub struct AppState {
    /// Search and rules settings applied to every move request
    pub protocol: ProtocolConfig,
}

/// Create the application router with the given state.
/// This is separated out for testing purposes.
pub fn create_app(state: Arc<AppState>) -> Router {
    // CORS layer for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ten/board", get(initial_board))
        .route("/ten/move", post(make_move))
        .layer(cors)
        .with_state(state)
}

/// Create application state for testing (small fixed search, seeded)
#[cfg(test)]
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState {
        protocol: ProtocolConfig {
            mcts: mcts::MctsConfig::for_testing().with_max_iterations(30),
            draw_value: 0.0,
        },
    })
}

/// Creates a future that completes when a shutdown signal is received.
/// Handles Ctrl+C on all platforms.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from config.toml with env var overrides
    let config = load_config();

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.common.log_level)),
        )
        .init();

    let protocol = ProtocolConfig {
        mcts: config.mcts.to_mcts_config(),
        draw_value: config.ten.draw_value,
    };
    info!(
        time_budget_ms = config.mcts.time_budget_ms,
        exploration = config.mcts.exploration,
        num_workers = config.mcts.num_workers,
        draw_value = config.ten.draw_value,
        "Configuration loaded"
    );

    let app = create_app(Arc::new(AppState { protocol }));

    let addr = format!("{}:{}", config.web.host, config.web.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// ============================================================================
// Integration Tests
// ============================================================================
