use super::activity::ScheduledActivity;
use super::de;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One calendar day of a trip.
///
/// Activities are `Arc`-shared so an untouched activity is reused as-is by
/// the next version of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    /// 1-based, contiguous across the trip (renumbered by the store).
    #[serde(default)]
    pub day_number: u32,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,
    /// Id or name of a trip destination.
    #[serde(default)]
    pub destination: String,
    #[serde(default, alias = "items")]
    pub activities: Vec<Arc<ScheduledActivity>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
}

impl DayPlan {
    pub fn new(date: Option<NaiveDate>, destination: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            day_number: 0,
            date,
            destination: destination.into(),
            activities: Vec::new(),
            notes: String::new(),
            flights: Vec::new(),
            accommodation: None,
        }
    }

    pub fn activity_index(&self, activity_id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == activity_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub departure_airport: String,
    #[serde(default)]
    pub arrival_airport: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
}
