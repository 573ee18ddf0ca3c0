//! Backend selection for the entry store.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible. The backend is chosen from the configured URL:
//! `memory://` selects [`MemoryStore`], anything else is handed to
//! `PostgreSQL`.

use chrono::{DateTime, Utc};
use waste_types::{NewWasteEntry, WasteEntry, WasteSummary};

use crate::entries::EntryStore;
use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::postgres::{PostgresConfig, PostgresPool};

/// URL scheme that selects the in-memory backend.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Handle to the record store shared by every request.
#[derive(Clone)]
pub enum WasteStore {
    /// `PostgreSQL` table `waste_entries`.
    Postgres(PostgresPool),
    /// Process-local vector.
    Memory(MemoryStore),
}

impl WasteStore {
    /// Open the store described by `config`.
    ///
    /// For `PostgreSQL` this connects eagerly and creates the schema if
    /// missing. There is no retry: the caller decides what a failed
    /// connection means.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the URL is invalid, the server is
    /// unreachable, or the schema cannot be created.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DbError> {
        if config.url.starts_with(MEMORY_URL_SCHEME) {
            tracing::info!("Using in-memory waste store");
            return Ok(Self::memory());
        }

        let pool = PostgresPool::connect(config).await?;
        pool.ensure_schema().await?;
        Ok(Self::Postgres(pool))
    }

    /// Create an empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Persist a new entry and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, input: NewWasteEntry) -> Result<WasteEntry, DbError> {
        match self {
            Self::Postgres(pool) => EntryStore::new(pool.pool()).insert(input).await,
            Self::Memory(store) => Ok(store.insert(input).await),
        }
    }

    /// Return entries newest first. `None` returns the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_all(&self, limit: Option<u32>) -> Result<Vec<WasteEntry>, DbError> {
        match self {
            Self::Postgres(pool) => EntryStore::new(pool.pool()).list(limit).await,
            Self::Memory(store) => Ok(store.list(limit).await),
        }
    }

    /// Aggregate quantities per waste type since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn summarize(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<WasteSummary, DbError> {
        match self {
            Self::Postgres(pool) => EntryStore::new(pool.pool()).summarize(since).await,
            Self::Memory(store) => Ok(store.summarize(since).await),
        }
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if `PostgreSQL` does not answer.
    pub async fn ping(&self) -> Result<(), DbError> {
        match self {
            Self::Postgres(pool) => pool.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Release the backend's connections.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Memory(_) => tracing::info!("In-memory waste store released"),
        }
    }
}
