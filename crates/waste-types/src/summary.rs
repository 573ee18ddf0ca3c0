//! Per-type quantity aggregation over recorded entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Key under which entries without a waste type are grouped.
pub const UNSPECIFIED_TYPE: &str = "unspecified";

/// Quantity totals across a window of recorded entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct WasteSummary {
    /// Lower bound of the window (`None` covers all entries).
    pub since: Option<DateTime<Utc>>,
    /// Number of entries in the window.
    pub count: u64,
    /// Sum of all quantities in the window. Missing quantities count as 0.
    pub total_quantity: f64,
    /// Summed quantity per waste type.
    pub by_type: BTreeMap<String, f64>,
}

impl WasteSummary {
    /// Create an empty summary for the given window.
    pub const fn new(since: Option<DateTime<Utc>>) -> Self {
        Self {
            since,
            count: 0,
            total_quantity: 0.0,
            by_type: BTreeMap::new(),
        }
    }

    /// Fold a single entry into the totals.
    pub fn record(&mut self, waste_type: Option<&str>, quantity: Option<f64>) {
        self.add_group(waste_type, 1, quantity.unwrap_or(0.0));
    }

    /// Fold a pre-aggregated group (as returned by a `GROUP BY` query).
    pub fn add_group(&mut self, waste_type: Option<&str>, count: u64, quantity: f64) {
        let key = waste_type.unwrap_or(UNSPECIFIED_TYPE).to_owned();
        *self.by_type.entry(key).or_insert(0.0) += quantity;
        self.count = self.count.saturating_add(count);
        self.total_quantity += quantity;
    }
}
