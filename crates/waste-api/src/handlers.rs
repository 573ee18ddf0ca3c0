//! REST endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/add_waste` | Record one entry |
//! | `GET` | `/waste_items` | List entries, most recent first (`?limit=N`) |
//! | `GET` | `/waste_summary` | Per-type totals (`?days=N`) |
//! | `GET` | `/health` | Liveness and store reachability |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use chrono::{DateTime, TimeDelta, Utc};
use waste_types::NewWasteEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// Longest trailing window `/waste_summary` accepts, in days (about a
/// century). Keeps `since` well inside the `TIMESTAMPTZ` range.
pub const MAX_SUMMARY_DAYS: u32 = 36_500;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /waste_items`.
#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    /// Maximum number of entries to return. Absent means all of them.
    pub limit: Option<u32>,
}

/// Query parameters for `GET /waste_summary`.
#[derive(Debug, serde::Deserialize)]
pub struct SummaryQuery {
    /// Only include entries recorded within the last `days` days.
    /// Absent or `0` covers every entry; at most [`MAX_SUMMARY_DAYS`].
    pub days: Option<u32>,
}

// ---------------------------------------------------------------------------
// POST /add_waste
// ---------------------------------------------------------------------------

/// Record one waste entry.
///
/// The body must be a JSON object; an empty body is treated as `{}`.
/// Fields are optional and unknown fields are dropped.
pub async fn add_waste(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input = parse_entry(&body)?;
    let entry = state.store.insert(input).await?;

    tracing::info!(id = %entry.id, waste_type = ?entry.waste_type, "waste entry recorded");

    Ok(Json(serde_json::json!({
        "success": true,
        "entry": entry,
    })))
}

// ---------------------------------------------------------------------------
// GET /waste_items
// ---------------------------------------------------------------------------

/// List entries ordered by `recordedAt`, most recent first.
///
/// # Query Parameters
///
/// - `limit`: at least 1, clamped to the configured maximum.
pub async fn list_waste(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(invalid_query)?;
    let limit = match params.limit {
        None => None,
        Some(0) => {
            return Err(ApiError::InvalidQuery(String::from(
                "limit must be at least 1",
            )));
        }
        Some(n) => Some(n.min(state.max_list_limit)),
    };

    let entries = state.store.list_all(limit).await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// GET /waste_summary
// ---------------------------------------------------------------------------

/// Summed quantity per waste type, optionally over a trailing window.
pub async fn waste_summary(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(invalid_query)?;
    let since = match params.days {
        None | Some(0) => None,
        Some(days) => Some(window_start(Utc::now(), days)?),
    };

    let summary = state.store.summarize(since).await?;
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report whether the service and its store are reachable.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    state.store.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "health check failed");
        ApiError::Unavailable(String::from("record store is not reachable"))
    })?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "store": state.store.backend_name(),
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a request body into an entry document.
fn parse_entry(body: &[u8]) -> Result<NewWasteEntry, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NewWasteEntry::default());
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("body is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::BadRequest(String::from(
            "body must be a JSON object",
        )));
    }

    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Turn Axum's query string rejection into a JSON error.
fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError::InvalidQuery(rejection.body_text())
}

/// Start of a trailing window of `days` days ending at `now`.
fn window_start(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, ApiError> {
    if days > MAX_SUMMARY_DAYS {
        return Err(ApiError::InvalidQuery(format!(
            "days must be at most {MAX_SUMMARY_DAYS}, got {days}"
        )));
    }
    TimeDelta::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| ApiError::InvalidQuery(format!("days={days} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_an_empty_document() {
        assert_eq!(parse_entry(b"").unwrap(), NewWasteEntry::default());
        assert_eq!(parse_entry(b"  \n").unwrap(), NewWasteEntry::default());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(matches!(parse_entry(b"[1,2]"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_entry(b"\"plastic\""), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_entry(b"{oops"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn field_errors_are_bad_requests() {
        let err = parse_entry(br#"{"quantity": "heaps"}"#).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg.contains("quantity")));
    }

    #[test]
    fn window_start_subtracts_days() {
        let now = Utc::now();
        let start = window_start(now, 7).unwrap();
        assert_eq!(now - start, TimeDelta::days(7));
    }

    #[test]
    fn window_is_capped() {
        assert!(window_start(Utc::now(), MAX_SUMMARY_DAYS).is_ok());
        assert!(matches!(
            window_start(Utc::now(), MAX_SUMMARY_DAYS + 1),
            Err(ApiError::InvalidQuery(_))
        ));
    }

    #[test]
    fn huge_windows_are_rejected() {
        assert!(matches!(
            window_start(Utc::now(), u32::MAX),
            Err(ApiError::InvalidQuery(_))
        ));
    }
}
