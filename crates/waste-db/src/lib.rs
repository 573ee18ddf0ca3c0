//! Data access layer for the waste ledger service.
//!
//! Entries live in a single `waste_entries` table in `PostgreSQL`, or in an
//! in-memory vector when the configured URL uses the `memory://` scheme.
//! Callers hold one [`WasteStore`] for the lifetime of the process: it is
//! opened once at startup and closed on shutdown.
//!
//! ```text
//! WasteStore
//!     |
//!     +-- Postgres --> PostgresPool --> EntryStore (waste_entries table)
//!     |
//!     +-- Memory ----> MemoryStore (RwLock<Vec<WasteEntry>>)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- [`WasteStore`] backend dispatch
//! - [`postgres`] -- `PostgreSQL` connection pool, configuration, schema bootstrap
//! - [`entries`] -- Insert, list, and aggregate queries on `waste_entries`
//! - [`memory`] -- In-memory backend
//! - [`error`] -- Shared error types

pub mod entries;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use entries::{EntryStore, WasteEntryRow};
pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::{MEMORY_URL_SCHEME, WasteStore};
