//! In-memory backend.
//!
//! Holds entries in a `Vec` behind a [`tokio::sync::RwLock`]. Nothing
//! survives a restart; intended for tests and running without a database.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use waste_types::{NewWasteEntry, WasteEntry, WasteSummary};

/// Process-local entry store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Vec<WasteEntry>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new entry and return it as stored.
    pub async fn insert(&self, input: NewWasteEntry) -> WasteEntry {
        let entry = input.into_entry();
        self.entries.write().await.push(entry.clone());
        tracing::debug!(id = %entry.id, "Inserted waste entry (memory)");
        entry
    }

    /// Return entries newest first, optionally bounded by `limit`.
    pub async fn list(&self, limit: Option<u32>) -> Vec<WasteEntry> {
        let mut entries = self.entries.read().await.clone();
        entries.sort_unstable_by_key(|entry| Reverse((entry.recorded_at, entry.id)));
        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        entries
    }

    /// Aggregate quantities per waste type for entries recorded at or
    /// after `since`.
    pub async fn summarize(&self, since: Option<DateTime<Utc>>) -> WasteSummary {
        let entries = self.entries.read().await;
        let mut summary = WasteSummary::new(since);
        for entry in entries
            .iter()
            .filter(|entry| since.is_none_or(|since| entry.recorded_at >= since))
        {
            summary.record(entry.waste_type.as_deref(), entry.quantity);
        }
        summary
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
