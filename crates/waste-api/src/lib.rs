//! HTTP routing layer for the waste ledger service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`POST /add_waste`** to record one entry
//! - **`GET /waste_items`** to list entries, most recent first
//! - **`GET /waste_summary`** for per-type quantity totals
//! - **`GET /health`** for liveness and store reachability
//!
//! # Architecture
//!
//! Handlers translate JSON bodies and query strings into calls on the
//! shared [`WasteStore`](waste_db::WasteStore) held in [`AppState`], and
//! every failure is turned into a JSON error body by [`ApiError`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
