use super::category::ExpenseCategory;
use super::de;
use super::owner::OwnerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trip-level expense, optionally linked to a day.
///
/// `amount` is always in the trip's base currency, rounded to 6 decimals;
/// `currency` only records what the user originally entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default, alias = "memo")]
    pub description: String,
    #[serde(default, alias = "paidBy")]
    pub owner: OwnerId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
}

impl Expense {
    /// New unlinked expense; `amount` must already be in the base currency.
    pub fn new(amount: f64, currency: &str, description: &str, owner: OwnerId) -> Self {
        Self {
            id: super::new_id(),
            amount,
            currency: currency.to_string(),
            description: description.to_string(),
            owner,
            created_at: Utc::now(),
            day_id: None,
            category: None,
        }
    }

    pub fn on_day(mut self, day_id: impl Into<String>) -> Self {
        self.day_id = Some(day_id.into());
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// An expense recorded on a single activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityExpense {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default, alias = "memo")]
    pub description: String,
    #[serde(default, alias = "paidBy")]
    pub owner: OwnerId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ActivityExpense {
    pub fn new(amount: f64, currency: &str, description: &str, owner: OwnerId) -> Self {
        Self {
            id: super::new_id(),
            amount,
            currency: currency.to_string(),
            description: description.to_string(),
            owner,
            created_at: Utc::now(),
        }
    }
}

/// Scratch value left behind by the camera/receipt flow until the user
/// confirms it as a real expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingExpense {
    #[serde(default, deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}
