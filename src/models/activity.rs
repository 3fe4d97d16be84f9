use super::category::ActivityCategory;
use super::de;
use super::expense::ActivityExpense;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One plannable item within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivity {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Secondary display name (e.g. the name in the local language).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_local: Option<String>,
    /// Start time, `HH:MM` or empty. Owned by the position in the day, see
    /// `store::activities` reorder.
    #[serde(default)]
    pub time: String,
    /// Free-form duration token ("2h", "90min", "1h30m"); empty for places.
    #[serde(default)]
    pub duration: String,
    #[serde(default, alias = "type")]
    pub category: ActivityCategory,
    /// Base currency.
    #[serde(default, deserialize_with = "de::number", alias = "cost")]
    pub estimated_cost: f64,
    #[serde(default, alias = "isCompleted")]
    pub completed: bool,
    #[serde(default, alias = "isSkipped")]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub memos: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<ActivityExpense>,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl ScheduledActivity {
    pub fn new(name: impl Into<String>, category: ActivityCategory) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
            name_local: None,
            time: String::new(),
            duration: String::new(),
            category,
            estimated_cost: 0.0,
            completed: false,
            skipped: false,
            booking: None,
            coordinates: None,
            memos: Vec::new(),
            expenses: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInfo {
    #[serde(default)]
    pub confirmation_code: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub uri: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}
