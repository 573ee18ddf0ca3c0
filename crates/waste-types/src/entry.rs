//! The recorded waste entry and its input document.
//!
//! [`NewWasteEntry`] is deliberately lenient: it accepts whatever a form or
//! script is likely to post (snake_case aliases, numeric strings, missing
//! fields) and only rejects values that cannot be stored at all. Unknown
//! fields are dropped.

use chrono::{DateTime, SubsecRound, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::ids::WasteEntryId;

/// Number of fractional-second digits kept on `recorded_at`.
///
/// Matches `PostgreSQL` `TIMESTAMPTZ` so both store backends return the
/// same value that was handed out at insert time.
const TIMESTAMP_PRECISION: u16 = 6;

/// Current UTC time truncated to the precision the store keeps.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(TIMESTAMP_PRECISION)
}

/// A single recorded observation of a waste type and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct WasteEntry {
    /// Store-assigned identifier, immutable after creation.
    pub id: WasteEntryId,
    /// Free-form waste category label (e.g. `plastic`).
    pub waste_type: Option<String>,
    /// Recorded amount. Units are whatever the caller uses.
    pub quantity: Option<f64>,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Input document for the insert operation.
///
/// Every field is optional. `recorded_at` defaults to the moment of
/// insertion when absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWasteEntry {
    /// Waste category label. Scalars other than strings are coerced to text.
    #[serde(default, alias = "waste_type", deserialize_with = "deserialize_waste_type")]
    pub waste_type: Option<String>,
    /// Amount. JSON numbers and numeric strings are accepted.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: Option<f64>,
    /// Caller-supplied timestamp, if any. Older clients send it as `date`.
    #[serde(default, alias = "recorded_at", alias = "date")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl NewWasteEntry {
    /// Build an input document from a type label and quantity.
    pub fn new(waste_type: impl Into<String>, quantity: f64) -> Self {
        Self {
            waste_type: Some(waste_type.into()),
            quantity: Some(quantity),
            recorded_at: None,
        }
    }

    /// Set an explicit recording timestamp.
    #[must_use]
    pub const fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Turn the input into a stored entry, assigning a fresh id and
    /// defaulting `recorded_at` to now.
    pub fn into_entry(self) -> WasteEntry {
        WasteEntry {
            id: WasteEntryId::new(),
            waste_type: self.waste_type,
            quantity: self.quantity,
            recorded_at: self
                .recorded_at
                .map_or_else(now_micros, |at| at.trunc_subsecs(TIMESTAMP_PRECISION)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelInput {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityInput {
    Number(f64),
    Text(String),
}

fn deserialize_waste_type<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<LabelInput>::deserialize(deserializer)
        .map_err(|e| D::Error::custom(format!("wasteType must be a string: {e}")))?;
    Ok(label.map(|input| match input {
        LabelInput::Text(text) => text,
        LabelInput::Number(number) => number.to_string(),
        LabelInput::Flag(flag) => flag.to_string(),
    }))
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<QuantityInput>::deserialize(deserializer)
        .map_err(|e| D::Error::custom(format!("quantity must be a number: {e}")))?;
    let value = match input {
        None => return Ok(None),
        Some(QuantityInput::Number(number)) => number,
        Some(QuantityInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|e| {
                D::Error::custom(format!("quantity `{text}` is not a number: {e}"))
            })?
        }
    };
    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(D::Error::custom("quantity must be a finite number"))
    }
}
