//! Shared application state for the HTTP layer.

use waste_db::WasteStore;

/// Default upper bound applied to `?limit=` on listings.
pub const DEFAULT_MAX_LIST_LIMIT: u32 = 1000;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The store handle is owned here for the lifetime of the
/// server; the entrypoint closes it after shutdown.
#[derive(Clone)]
pub struct AppState {
    /// The record store every handler reads from and writes to.
    pub store: WasteStore,
    /// Largest `limit` a listing request may ask for.
    pub max_list_limit: u32,
}

impl AppState {
    /// Create application state around an opened store.
    pub const fn new(store: WasteStore) -> Self {
        Self {
            store,
            max_list_limit: DEFAULT_MAX_LIST_LIMIT,
        }
    }

    /// Override the listing bound. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_list_limit(mut self, max: u32) -> Self {
        self.max_list_limit = max.max(1);
        self
    }

    /// State backed by an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(WasteStore::memory())
    }
}
