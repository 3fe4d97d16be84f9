//! JSON snapshot format.
//!
//! - `version < 5` (or no version): one trip at the top level
//!   (`tripName`, `startDate`, `endDate`, `days[]`, `expenses[]`,
//!   `totalBudget`, `owners[]`, …). A `days` array is mandatory.
//! - `version >= 5`: `{ "version": 5, "trips": [ <trip>, … ] }`.
//!
//! Every imported trip gets a fresh id and goes through `Trip::normalize`.

use super::TripStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Trip, new_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SNAPSHOT_VERSION: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub trips: Vec<Trip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_trip_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn from_store(store: &TripStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            trips: store.trips().iter().map(|t| t.as_ref().clone()).collect(),
            active_trip_id: Some(store.active_trip_id().to_string()),
            exported_at: Utc::now(),
        }
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse an import payload into ready-to-store trips.
pub fn parse(payload: &str) -> AppResult<Vec<Trip>> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Object(mut map) = value else {
        return Err(AppError::Import("payload is not a JSON object".into()));
    };

    let version = map.get("version").and_then(Value::as_u64).unwrap_or(1);

    let raw_trips: Vec<Value> = if version >= u64::from(SNAPSHOT_VERSION) {
        match map.remove("trips") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AppError::Import(format!(
                    "version {version} payload without a trips array"
                )));
            }
        }
    } else {
        if !matches!(map.get("days"), Some(Value::Array(_))) {
            return Err(AppError::Import("legacy payload without a days array".into()));
        }
        vec![Value::Object(map)]
    };

    if raw_trips.is_empty() {
        return Err(AppError::Import("no trips in payload".into()));
    }

    let now = Utc::now();
    raw_trips
        .into_iter()
        .map(|raw| {
            if !raw.is_object() {
                return Err(AppError::Import("trip entry is not an object".into()));
            }
            let mut trip: Trip = serde_json::from_value(raw)?;
            trip.id = new_id();
            if trip.name.trim().is_empty() {
                trip.name = "Imported trip".to_string();
            }
            trip.updated_at = now;
            trip.normalize();
            Ok(trip)
        })
        .collect()
}
