//! Route definitions for the SIM Clinic HTTP API.
//!
//! All routes are mounted under `/api`. Every route except the public
//! allow-list in [`crate::middleware::auth`] passes through the auth gateway.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_gateway,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Account management endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route(
            "/users/{id}/revocations",
            get(handlers::user::list_revocations),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
