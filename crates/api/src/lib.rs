//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the five wallet operations plus a health check
//! - JSON error responses carrying the wallet error code

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use wallet_core::WalletService;

pub use error::ApiError;

/// Upper bound on request handling, above the rate feed's own timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The wallet engine.
    pub wallet: Arc<WalletService>,
}

impl AppState {
    /// Wraps a wallet service for sharing across handlers.
    pub fn new(wallet: WalletService) -> Self {
        Self {
            wallet: Arc::new(wallet),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
