//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled for
//! browser clients and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /add_waste` -- record one entry
/// - `GET /waste_items` -- list entries, newest first
/// - `GET /waste_summary` -- per-type totals
/// - `GET /health` -- liveness and store reachability
///
/// CORS allows any origin; there is no authentication layer.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/add_waste", post(handlers::add_waste))
        .route("/waste_items", get(handlers::list_waste))
        .route("/waste_summary", get(handlers::waste_summary))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
