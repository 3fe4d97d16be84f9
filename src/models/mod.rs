//! Trip data model: trips → days → activities → expenses, plus owners.
//!
//! Field names serialize in camelCase so the same structs are the on-disk
//! snapshot shape (see `store::snapshot`).

pub mod activity;
pub mod category;
pub mod day;
pub mod expense;
pub mod owner;
pub mod trip;

pub use activity::{BookingInfo, Coordinates, MediaAttachment, MediaKind, ScheduledActivity};
pub use category::{ActivityCategory, ExpenseCategory};
pub use day::{Accommodation, DayPlan, Flight};
pub use expense::{ActivityExpense, Expense, PendingExpense};
pub use owner::{OwnerConfig, OwnerId};
pub use trip::{
    Destination, ImmigrationDirection, ImmigrationSchedule, NewTrip, RestaurantComment,
    TransportLeg, Trip,
};

/// Fresh entity identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Lenient deserializers for snapshot fields written by older clients.
pub(crate) mod de {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `""`, `null` and unparsable dates become `None`.
    pub fn opt_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.and_then(|s| {
            let s = s.trim();
            // accept full ISO timestamps too, only the date part matters
            let s = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        }))
    }

    /// Numbers, numeric strings and `null` (→ 0.0).
    pub fn number<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(d)?;
        Ok(match v {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    /// Any scalar id (string or number) as a string; missing ids stay empty
    /// and are filled in by the importer.
    pub fn id<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(d)?;
        Ok(match v {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }
}
