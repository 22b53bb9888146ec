//! # clinic-api
//!
//! HTTP API layer for SIM Clinic built on Axum.
//!
//! Provides the auth and user endpoints, the bearer-token gateway, request
//! logging, CORS, extractors, and DTOs.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
