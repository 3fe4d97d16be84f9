//! Logistics slice: transport legs, immigration schedules, destinations and
//! restaurant comments. Plain list CRUD on the trip.

use crate::models::{
    Destination, ImmigrationSchedule, RestaurantComment, TransportLeg, Trip, new_id,
};
use crate::money::round_to_persisted;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum LogisticsAction {
    AddTransport(TransportLeg),
    UpdateTransport {
        leg_id: String,
        patch: TransportPatch,
    },
    RemoveTransport {
        leg_id: String,
    },
    AddImmigration(ImmigrationSchedule),
    RemoveImmigration {
        schedule_id: String,
    },
    AddDestination(Destination),
    RemoveDestination {
        destination_id: String,
    },
    AddRestaurantComment(RestaurantComment),
    RemoveRestaurantComment {
        comment_id: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TransportPatch {
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<NaiveDate>,
    pub mode: Option<String>,
    pub departure_time: Option<String>,
    pub duration: Option<String>,
    pub cost: Option<f64>,
}

/// Push `item` with a fresh id when it has none.
fn push_with_id<T: Clone>(list: &mut Vec<T>, item: &T, id: impl Fn(&mut T) -> &mut String) {
    let mut item = item.clone();
    let slot = id(&mut item);
    if slot.is_empty() {
        *slot = new_id();
    }
    list.push(item);
}

fn remove_by<T>(list: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = list.len();
    list.retain(|x| !matches(x));
    list.len() != before
}

pub fn reduce(trip: &Trip, action: &LogisticsAction) -> Option<Trip> {
    let mut next = trip.clone();

    let changed = match action {
        LogisticsAction::AddTransport(leg) => {
            if !leg.cost.is_finite() {
                return None;
            }
            push_with_id(&mut next.transport_legs, leg, |l| &mut l.id);
            if let Some(last) = next.transport_legs.last_mut() {
                last.cost = round_to_persisted(last.cost);
            }
            true
        }
        LogisticsAction::UpdateTransport { leg_id, patch } => {
            if patch.cost.is_some_and(|c| !c.is_finite()) {
                return None;
            }
            let leg = next.transport_legs.iter_mut().find(|l| &l.id == leg_id)?;
            if let Some(v) = &patch.from {
                leg.from = v.clone();
            }
            if let Some(v) = &patch.to {
                leg.to = v.clone();
            }
            if let Some(v) = patch.date {
                leg.date = Some(v);
            }
            if let Some(v) = &patch.mode {
                leg.mode = v.clone();
            }
            if let Some(v) = &patch.departure_time {
                leg.departure_time = v.clone();
            }
            if let Some(v) = &patch.duration {
                leg.duration = v.clone();
            }
            if let Some(v) = patch.cost {
                leg.cost = round_to_persisted(v);
            }
            true
        }
        LogisticsAction::RemoveTransport { leg_id } => {
            remove_by(&mut next.transport_legs, |l| &l.id == leg_id)
        }
        LogisticsAction::AddImmigration(schedule) => {
            push_with_id(&mut next.immigration_schedules, schedule, |s| &mut s.id);
            true
        }
        LogisticsAction::RemoveImmigration { schedule_id } => {
            remove_by(&mut next.immigration_schedules, |s| &s.id == schedule_id)
        }
        LogisticsAction::AddDestination(dest) => {
            if dest.name.trim().is_empty() {
                return None;
            }
            push_with_id(&mut next.destinations, dest, |d| &mut d.id);
            true
        }
        LogisticsAction::RemoveDestination { destination_id } => {
            remove_by(&mut next.destinations, |d| &d.id == destination_id)
        }
        LogisticsAction::AddRestaurantComment(comment) => {
            push_with_id(&mut next.restaurant_comments, comment, |c| &mut c.id);
            true
        }
        LogisticsAction::RemoveRestaurantComment { comment_id } => {
            remove_by(&mut next.restaurant_comments, |c| &c.id == comment_id)
        }
    };

    changed.then_some(next)
}
