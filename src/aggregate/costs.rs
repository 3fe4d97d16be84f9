//! Cost totals over a trip snapshot. Everything here is in the base currency
//! and side-effect free.

use crate::models::{OwnerId, Trip};
use crate::money::round_to_persisted;
use chrono::NaiveDate;

/// Owner filter for expense totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFilter {
    All,
    Owner(OwnerId),
}

impl OwnerFilter {
    fn accepts(&self, owner: &OwnerId) -> bool {
        match self {
            OwnerFilter::All => true,
            OwnerFilter::Owner(id) => id == owner,
        }
    }
}

impl From<OwnerId> for OwnerFilter {
    fn from(id: OwnerId) -> Self {
        OwnerFilter::Owner(id)
    }
}

/// Sum of `estimated_cost` over every activity of every day.
pub fn total_estimated_cost(trip: &Trip) -> f64 {
    round_to_persisted(
        trip.days
            .iter()
            .flat_map(|d| d.activities.iter())
            .map(|a| a.estimated_cost)
            .sum(),
    )
}

/// Sum of `estimated_cost` for one day; 0 for an unknown day.
pub fn day_estimated_cost(trip: &Trip, day_id: &str) -> f64 {
    trip.day(day_id)
        .map(|d| round_to_persisted(d.activities.iter().map(|a| a.estimated_cost).sum()))
        .unwrap_or(0.0)
}

/// Activity expenses of the day plus global expenses linked to it.
pub fn day_actual_cost(trip: &Trip, day_id: &str) -> f64 {
    let activity_part: f64 = trip
        .day(day_id)
        .map(|d| d.activities.iter().map(|a| a.expense_total()).sum())
        .unwrap_or(0.0);
    let linked_part: f64 = trip
        .expenses
        .iter()
        .filter(|e| e.day_id.as_deref() == Some(day_id))
        .map(|e| e.amount)
        .sum();
    round_to_persisted(activity_part + linked_part)
}

/// Every global and every activity expense.
pub fn total_actual_expenses(trip: &Trip) -> f64 {
    total_expenses_by_owner(trip, &OwnerFilter::All)
}

/// Same as [`total_actual_expenses`], restricted to one owner.
pub fn total_expenses_by_owner(trip: &Trip, filter: &OwnerFilter) -> f64 {
    let global: f64 = trip
        .expenses
        .iter()
        .filter(|e| filter.accepts(&e.owner))
        .map(|e| e.amount)
        .sum();
    let per_activity: f64 = trip
        .days
        .iter()
        .flat_map(|d| d.activities.iter())
        .flat_map(|a| a.expenses.iter())
        .filter(|e| filter.accepts(&e.owner))
        .map(|e| e.amount)
        .sum();
    round_to_persisted(global + per_activity)
}

/// Budget minus actual expenses (negative when over budget).
pub fn budget_remaining(trip: &Trip) -> f64 {
    round_to_persisted(trip.total_budget - total_actual_expenses(trip))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCostRow {
    pub day_id: String,
    pub day_number: u32,
    pub date: Option<NaiveDate>,
    pub estimated: f64,
    pub actual: f64,
}

/// Per-day estimated vs. actual, in day order.
pub fn day_breakdown(trip: &Trip) -> Vec<DayCostRow> {
    trip.days
        .iter()
        .map(|d| DayCostRow {
            day_id: d.id.clone(),
            day_number: d.day_number,
            date: d.date,
            estimated: day_estimated_cost(trip, &d.id),
            actual: day_actual_cost(trip, &d.id),
        })
        .collect()
}
