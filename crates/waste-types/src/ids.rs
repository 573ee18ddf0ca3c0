//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Entry IDs use UUID v7 (time-ordered) so that the recency index and the
//! tie-break on equal timestamps agree with insertion order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a recorded waste entry.
///
/// Assigned exactly once by the store layer when the entry is inserted.
/// The field is private: outside this crate an id is either freshly
/// generated or read back from a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct WasteEntryId(Uuid);

impl WasteEntryId {
    /// A fresh v7 id. Later calls compare greater.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The raw UUID, for binding into a query.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for WasteEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for WasteEntryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rehydrate an id read from the `waste_entries.id` column.
impl From<Uuid> for WasteEntryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_time_ordered() {
        let first = WasteEntryId::new();
        let second = WasteEntryId::new();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = WasteEntryId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
