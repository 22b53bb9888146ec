//! Application builder that wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use clinic_core::config::{AppConfig, CorsConfig};
use clinic_core::error::AppError;
use clinic_database::DatabasePool;
use clinic_database::repositories::{RevokedTokenRepository, RoleRepository, UserRepository};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the HTTP server over PostgreSQL-backed stores until Ctrl+C.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting SIM Clinic server...");

    let pool = db_pool.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let role_repo = Arc::new(RoleRepository::new(pool.clone()));
    let revoked_repo = Arc::new(RevokedTokenRepository::new(pool));

    let cors = config.server.cors.clone();
    let addr = config.server.bind_address();

    let state =
        AppState::new(config, user_repo, role_repo, revoked_repo).with_database(db_pool);
    let app = build_app(state, &cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SIM Clinic server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
