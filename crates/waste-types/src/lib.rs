//! Shared record types for the waste ledger service.
//!
//! This crate is the single source of truth for the shapes that cross the
//! HTTP boundary and the store boundary. Types flow downstream to
//! `TypeScript` via `ts-rs` for dashboard clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for entry identifiers
//! - [`entry`] -- [`WasteEntry`] and the lenient [`NewWasteEntry`] input document
//! - [`summary`] -- Per-type quantity aggregation

pub mod entry;
pub mod ids;
pub mod summary;

// Re-export all public types at crate root for convenience.
pub use entry::{NewWasteEntry, WasteEntry, now_micros};
pub use ids::WasteEntryId;
pub use summary::{UNSPECIFIED_TYPE, WasteSummary};
