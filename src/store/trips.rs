//! Trip-level slice: header fields, current day, duplication.

use crate::models::{DayPlan, ScheduledActivity, Trip, new_id};
use crate::money::round_to_persisted;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum TripInfoAction {
    Update {
        name: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        total_budget: Option<f64>,
    },
    SetCurrentDay {
        index: usize,
    },
}

pub fn reduce(trip: &Trip, action: &TripInfoAction) -> Option<Trip> {
    match action {
        TripInfoAction::Update {
            name,
            start_date,
            end_date,
            total_budget,
        } => {
            if name.is_none() && start_date.is_none() && end_date.is_none() && total_budget.is_none() {
                return None;
            }
            let start = start_date.or(trip.start_date);
            let end = end_date.or(trip.end_date);
            if let (Some(s), Some(e)) = (start, end)
                && e < s
            {
                return None;
            }
            if total_budget.is_some_and(|b| !b.is_finite() || b < 0.0) {
                return None;
            }

            let mut next = trip.clone();
            if let Some(n) = name {
                next.name = n.clone();
            }
            next.start_date = start;
            next.end_date = end;
            if let Some(b) = total_budget {
                next.total_budget = round_to_persisted(*b);
            }
            Some(next)
        }
        TripInfoAction::SetCurrentDay { index } => {
            if *index >= trip.days.len() || *index == trip.current_day_index {
                return None;
            }
            let mut next = trip.clone();
            next.current_day_index = *index;
            Some(next)
        }
    }
}

/// Deep copy for "duplicate trip".
///
/// Trip, days and activities get fresh ids. Expenses (global and per
/// activity), media, completion/skip flags and the pending camera expense
/// are reset; plans, notes, bookings, owners and logistics are kept.
pub fn duplicate(source: &Trip) -> Trip {
    let now = Utc::now();
    let days = source
        .days
        .iter()
        .map(|day| Arc::new(duplicate_day(day)))
        .collect();

    Trip {
        id: new_id(),
        name: format!("{} (copy)", source.name),
        start_date: source.start_date,
        end_date: source.end_date,
        days,
        current_day_index: 0,
        total_budget: source.total_budget,
        expenses: Vec::new(),
        restaurant_comments: source.restaurant_comments.clone(),
        destinations: source.destinations.clone(),
        immigration_schedules: source.immigration_schedules.clone(),
        transport_legs: source.transport_legs.clone(),
        owners: source.owners.clone(),
        pending_camera_expense: None,
        created_at: now,
        updated_at: now,
    }
}

fn duplicate_day(day: &DayPlan) -> DayPlan {
    DayPlan {
        id: new_id(),
        activities: day
            .activities
            .iter()
            .map(|a| Arc::new(duplicate_activity(a)))
            .collect(),
        ..day.clone()
    }
}

fn duplicate_activity(activity: &ScheduledActivity) -> ScheduledActivity {
    ScheduledActivity {
        id: new_id(),
        completed: false,
        skipped: false,
        expenses: Vec::new(),
        media: Vec::new(),
        ..activity.clone()
    }
}
