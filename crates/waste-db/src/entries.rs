//! Queries on the `waste_entries` table.
//!
//! Listing is newest-first on `(recorded_at DESC, id DESC)`. Ids are UUID
//! v7, so entries recorded in the same microsecond still come back in
//! reverse insertion order.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use waste_types::{NewWasteEntry, WasteEntry, WasteEntryId, WasteSummary};

use crate::error::DbError;

/// Operations on the `waste_entries` table.
pub struct EntryStore<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryStore<'a> {
    /// Create a new entry store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new entry and return it as stored.
    ///
    /// The id is assigned here; `recorded_at` defaults to now when the
    /// input does not carry one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, input: NewWasteEntry) -> Result<WasteEntry, DbError> {
        let entry = input.into_entry();

        let row = sqlx::query_as::<_, WasteEntryRow>(
            r"INSERT INTO waste_entries (id, waste_type, quantity, recorded_at)
              VALUES ($1, $2, $3, $4)
              RETURNING id, waste_type, quantity, recorded_at",
        )
        .bind(entry.id.into_inner())
        .bind(entry.waste_type.as_deref())
        .bind(entry.quantity)
        .bind(entry.recorded_at)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = %row.id, "Inserted waste entry");
        Ok(row.into())
    }

    /// Query entries newest first, optionally bounded by `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<WasteEntry>, DbError> {
        let rows = sqlx::query_as::<_, WasteEntryRow>(
            r"SELECT id, waste_type, quantity, recorded_at
              FROM waste_entries
              ORDER BY recorded_at DESC, id DESC
              LIMIT $1",
        )
        .bind(limit.map(i64::from))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "Listed waste entries");
        Ok(rows.into_iter().map(WasteEntry::from).collect())
    }

    /// Aggregate quantities per waste type for entries recorded at or
    /// after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn summarize(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<WasteSummary, DbError> {
        let groups = sqlx::query_as::<_, TypeTotalRow>(
            r"SELECT waste_type,
                     COUNT(*) AS entries,
                     COALESCE(SUM(quantity), 0)::DOUBLE PRECISION AS quantity
              FROM waste_entries
              WHERE $1::TIMESTAMPTZ IS NULL OR recorded_at >= $1
              GROUP BY waste_type",
        )
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        let mut summary = WasteSummary::new(since);
        for group in &groups {
            summary.add_group(
                group.waste_type.as_deref(),
                u64::try_from(group.entries).unwrap_or(0),
                group.quantity,
            );
        }
        Ok(summary)
    }
}

/// A row from the `waste_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WasteEntryRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Waste category label.
    pub waste_type: Option<String>,
    /// Recorded amount.
    pub quantity: Option<f64>,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl From<WasteEntryRow> for WasteEntry {
    fn from(row: WasteEntryRow) -> Self {
        Self {
            id: WasteEntryId::from(row.id),
            waste_type: row.waste_type,
            quantity: row.quantity,
            recorded_at: row.recorded_at,
        }
    }
}

/// One `GROUP BY waste_type` result.
#[derive(Debug, sqlx::FromRow)]
struct TypeTotalRow {
    waste_type: Option<String>,
    entries: i64,
    quantity: f64,
}
