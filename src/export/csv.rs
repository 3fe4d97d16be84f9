use crate::errors::AppResult;
use crate::models::{OwnerId, Trip};
use crate::money::Currency;
use chrono::NaiveDate;
use csv::Writer;
use std::io::Write;

pub const CSV_HEADER: [&str; 7] = [
    "Date",
    "Day",
    "Category",
    "Description",
    "Amount",
    "Currency",
    "Owner",
];

/// Category tag used for every activity-level row.
pub const ACTIVITY_ROW_CATEGORY: &str = "activity";

fn owner_label(trip: &Trip, owner: &OwnerId) -> String {
    trip.owner(owner)
        .map(|o| o.label().to_string())
        .unwrap_or_else(|| owner.to_string())
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Expense rows of one trip: global expenses first, then activity
/// expenses day by day.
///
/// `Amount` is the stored base-currency value, so `Currency` is always
/// `base`; the tag an expense was entered with is not the unit of the amount.
pub fn write_expenses<W: Write>(out: W, trip: &Trip, base: Currency) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;

    for e in &trip.expenses {
        let day = e.day_id.as_deref().and_then(|id| trip.day(id));
        let date = match day {
            Some(d) if d.date.is_some() => d.date,
            _ => Some(e.created_at.date_naive()),
        };
        wtr.write_record([
            fmt_date(date),
            day.map(|d| d.day_number.to_string()).unwrap_or_default(),
            e.category.unwrap_or_default().code().to_string(),
            e.description.clone(),
            e.amount.to_string(),
            base.code().to_string(),
            owner_label(trip, &e.owner),
        ])?;
    }

    for day in &trip.days {
        for activity in &day.activities {
            for e in &activity.expenses {
                let description = if e.description.is_empty() {
                    activity.name.clone()
                } else {
                    format!("{}: {}", activity.name, e.description)
                };
                wtr.write_record([
                    fmt_date(day.date.or(Some(e.created_at.date_naive()))),
                    day.day_number.to_string(),
                    ACTIVITY_ROW_CATEGORY.to_string(),
                    description,
                    e.amount.to_string(),
                    base.code().to_string(),
                    owner_label(trip, &e.owner),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
