//! Day slice. Every structural change renumbers `day_number` to `1..N`.

use super::{move_item, with_day};
use crate::models::{Accommodation, DayPlan, Flight, Trip, new_id};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum DayAction {
    /// Insert a day (at the end unless `index` is given). Without a date the
    /// day after the last dated day is used, or the trip start date.
    Add {
        date: Option<NaiveDate>,
        destination: String,
        index: Option<usize>,
    },
    Remove {
        day_id: String,
    },
    Reorder {
        from: usize,
        to: usize,
    },
    Update {
        day_id: String,
        patch: DayPatch,
    },
    AddFlight {
        day_id: String,
        flight: Flight,
    },
    RemoveFlight {
        day_id: String,
        flight_id: String,
    },
    SetAccommodation {
        day_id: String,
        accommodation: Option<Accommodation>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DayPatch {
    pub date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub notes: Option<String>,
}

impl DayPatch {
    fn is_empty(&self) -> bool {
        self.date.is_none() && self.destination.is_none() && self.notes.is_none()
    }
}

pub fn reduce(trip: &Trip, action: &DayAction) -> Option<Trip> {
    match action {
        DayAction::Add {
            date,
            destination,
            index,
        } => Some(add_day(trip, *date, destination, *index)),

        DayAction::Remove { day_id } => remove_day(trip, day_id),

        DayAction::Reorder { from, to } => {
            let mut next = trip.clone();
            if !move_item(&mut next.days, *from, *to) {
                return None;
            }
            next.current_day_index = follow_move(next.current_day_index, *from, *to);
            next.renumber_days();
            Some(next)
        }

        DayAction::Update { day_id, patch } => {
            if patch.is_empty() {
                return None;
            }
            let mut next = with_day(trip, day_id, |day| {
                if let Some(d) = patch.date {
                    day.date = Some(d);
                }
                if let Some(dest) = &patch.destination {
                    day.destination = dest.clone();
                }
                if let Some(notes) = &patch.notes {
                    day.notes = notes.clone();
                }
                true
            })?;
            if patch.date.is_some() {
                next.sync_end_date();
            }
            Some(next)
        }

        DayAction::AddFlight { day_id, flight } => with_day(trip, day_id, |day| {
            let mut flight = flight.clone();
            if flight.id.is_empty() {
                flight.id = new_id();
            }
            day.flights.push(flight);
            true
        }),

        DayAction::RemoveFlight { day_id, flight_id } => with_day(trip, day_id, |day| {
            let before = day.flights.len();
            day.flights.retain(|f| &f.id != flight_id);
            day.flights.len() != before
        }),

        DayAction::SetAccommodation {
            day_id,
            accommodation,
        } => with_day(trip, day_id, |day| {
            if &day.accommodation == accommodation {
                return false;
            }
            day.accommodation = accommodation.clone();
            true
        }),
    }
}

fn add_day(
    trip: &Trip,
    date: Option<NaiveDate>,
    destination: &str,
    index: Option<usize>,
) -> Trip {
    let mut next = trip.clone();

    let date = date.or_else(|| {
        match next.days.iter().rev().find_map(|d| d.date) {
            Some(last) => last.succ_opt(),
            None => next.start_date,
        }
    });
    let day = Arc::new(DayPlan::new(date, destination));

    match index {
        Some(i) if i < next.days.len() => next.days.insert(i, day),
        _ => next.days.push(day),
    }

    next.renumber_days();
    next.sync_end_date();
    next
}

fn remove_day(trip: &Trip, day_id: &str) -> Option<Trip> {
    let idx = trip.day_index(day_id)?;
    let mut next = trip.clone();
    next.days.remove(idx);

    // global expenses stay, they just lose their day link
    for e in &mut next.expenses {
        if e.day_id.as_deref() == Some(day_id) {
            e.day_id = None;
        }
    }

    if next.current_day_index > idx {
        next.current_day_index -= 1;
    }
    next.renumber_days();
    next.sync_end_date();
    Some(next)
}

/// Where the day at `current` ends up after moving `from` to `to`.
fn follow_move(current: usize, from: usize, to: usize) -> usize {
    if current == from {
        to
    } else if from < current && current <= to {
        current - 1
    } else if to <= current && current < from {
        current + 1
    } else {
        current
    }
}
