//! Trip store: the list of trips plus the active trip pointer.
//!
//! Mutations are split into slice modules (`trips`, `days`, `activities`,
//! `expenses`, `owners`, `logistics`). Each slice exposes an action enum and
//! a pure reducer `(&Trip, &Action) -> Option<Trip>`; `None` means the
//! action would break an invariant (or targets nothing) and is dropped.
//! `TripStore::apply` dispatches a `TripAction` to its slice and swaps the
//! new trip in.
//!
//! Trips, days and activities sit behind `Arc`, so a new trip value shares
//! every node the reducer did not touch with the previous one.

pub mod activities;
pub mod days;
pub mod expenses;
pub mod logistics;
pub mod owners;
pub mod snapshot;
pub mod trips;

use crate::models::{DayPlan, NewTrip, ScheduledActivity, Trip};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

pub use activities::{ActivityAction, ActivityPatch};
pub use days::{DayAction, DayPatch};
pub use expenses::{ExpenseAction, ExpensePatch};
pub use logistics::{LogisticsAction, TransportPatch};
pub use owners::OwnerAction;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use trips::TripInfoAction;

/// Any mutation scoped to the active trip.
#[derive(Debug, Clone)]
pub enum TripAction {
    Info(TripInfoAction),
    Day(DayAction),
    Activity(ActivityAction),
    Expense(ExpenseAction),
    Owner(OwnerAction),
    Logistics(LogisticsAction),
}

impl TripAction {
    fn reduce(&self, trip: &Trip) -> Option<Trip> {
        match self {
            TripAction::Info(a) => trips::reduce(trip, a),
            TripAction::Day(a) => days::reduce(trip, a),
            TripAction::Activity(a) => activities::reduce(trip, a),
            TripAction::Expense(a) => expenses::reduce(trip, a),
            TripAction::Owner(a) => owners::reduce(trip, a),
            TripAction::Logistics(a) => logistics::reduce(trip, a),
        }
    }

    /// Short label used for logs and the audit table.
    pub fn label(&self) -> &'static str {
        match self {
            TripAction::Info(_) => "trip",
            TripAction::Day(_) => "day",
            TripAction::Activity(_) => "activity",
            TripAction::Expense(_) => "expense",
            TripAction::Owner(_) => "owner",
            TripAction::Logistics(_) => "logistics",
        }
    }
}

macro_rules! impl_from_action {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for TripAction {
            fn from(a: $ty) -> Self {
                TripAction::$variant(a)
            }
        })*
    };
}

impl_from_action! {
    TripInfoAction => Info,
    DayAction => Day,
    ActivityAction => Activity,
    ExpenseAction => Expense,
    OwnerAction => Owner,
    LogisticsAction => Logistics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripStore {
    trips: Vec<Arc<Trip>>,
    active_trip_id: String,
    /// Ids deleted since this store was built; persistence removes only these.
    deleted: Vec<String>,
}

impl Default for TripStore {
    /// One empty trip, active.
    fn default() -> Self {
        Self::new(Trip::new(NewTrip {
            name: "My Trip".to_string(),
            ..NewTrip::default()
        }))
    }
}

impl TripStore {
    pub fn new(trip: Trip) -> Self {
        let active_trip_id = trip.id.clone();
        Self {
            trips: vec![Arc::new(trip)],
            active_trip_id,
            deleted: Vec::new(),
        }
    }

    /// Rebuild a store from persisted parts. Returns `None` for an empty
    /// trip list; an unknown active id falls back to the first trip.
    pub fn from_parts(trips: Vec<Trip>, active_trip_id: Option<&str>) -> Option<Self> {
        let first = trips.first()?.id.clone();
        let active = active_trip_id
            .filter(|id| trips.iter().any(|t| t.id == *id))
            .map(str::to_string)
            .unwrap_or(first);
        Some(Self {
            trips: trips.into_iter().map(Arc::new).collect(),
            active_trip_id: active,
            deleted: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn trips(&self) -> &[Arc<Trip>] {
        &self.trips
    }

    pub fn active_trip_id(&self) -> &str {
        &self.active_trip_id
    }

    pub fn active_trip(&self) -> &Trip {
        // `active_trip_id` always points at a stored trip: every path that
        // changes either the list or the id keeps them in sync.
        self.trip(&self.active_trip_id)
            .unwrap_or_else(|| self.trips[0].as_ref())
    }

    pub fn deleted_trip_ids(&self) -> &[String] {
        &self.deleted
    }

    pub fn trip(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id).map(|t| t.as_ref())
    }

    /// Resolve a full id or an unambiguous id prefix.
    pub fn resolve_trip_id(&self, input: &str) -> Option<String> {
        if let Some(t) = self.trip(input) {
            return Some(t.id.clone());
        }
        let mut found = self.trips.iter().filter(|t| t.id.starts_with(input));
        match (found.next(), found.next()) {
            (Some(t), None) if !input.is_empty() => Some(t.id.clone()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Trip-level operations
    // ------------------------------------------------------------------

    /// Append a new trip and make it active.
    pub fn create_trip(&mut self, spec: NewTrip) -> String {
        let trip = Trip::new(spec);
        let id = trip.id.clone();
        info!(trip_id = %id, name = %trip.name, "trip created");
        self.trips.push(Arc::new(trip));
        self.active_trip_id = id.clone();
        id
    }

    /// Remove a trip. Refused (returns `false`) for the last remaining trip
    /// and for unknown ids.
    pub fn delete_trip(&mut self, id: &str) -> bool {
        if self.trips.len() <= 1 {
            debug!(trip_id = id, "delete refused: last remaining trip");
            return false;
        }
        let Some(idx) = self.trips.iter().position(|t| t.id == id) else {
            debug!(trip_id = id, "delete ignored: unknown trip");
            return false;
        };
        self.trips.remove(idx);
        self.deleted.push(id.to_string());
        if self.active_trip_id == id {
            self.active_trip_id = self.trips[0].id.clone();
        }
        info!(trip_id = id, "trip deleted");
        true
    }

    /// Unknown ids leave the selection unchanged and return `false`.
    pub fn switch_trip(&mut self, id: &str) -> bool {
        if self.trip(id).is_none() {
            debug!(trip_id = id, "switch ignored: unknown trip");
            return false;
        }
        self.active_trip_id = id.to_string();
        true
    }

    /// Deep copy with fresh ids; see [`trips::duplicate`].
    pub fn duplicate_trip(&mut self, id: &str) -> Option<String> {
        let copy = trips::duplicate(self.trip(id)?);
        let new_id = copy.id.clone();
        info!(source = id, trip_id = %new_id, "trip duplicated");
        self.trips.push(Arc::new(copy));
        self.active_trip_id = new_id.clone();
        Some(new_id)
    }

    /// Import a JSON snapshot (legacy single trip or versioned multi-trip).
    /// Imported trips are appended with fresh ids and the first one becomes
    /// active. A malformed payload changes nothing and returns `false`.
    pub fn import_trip_data(&mut self, payload: &str) -> bool {
        match snapshot::parse(payload) {
            Ok(imported) => {
                let Some(first) = imported.first().map(|t| t.id.clone()) else {
                    return false;
                };
                info!(count = imported.len(), "trips imported");
                self.trips.extend(imported.into_iter().map(Arc::new));
                self.active_trip_id = first;
                true
            }
            Err(e) => {
                debug!(error = %e, "import rejected");
                false
            }
        }
    }

    /// Versioned snapshot of every trip.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_store(self)
    }

    // ------------------------------------------------------------------
    // Active-trip mutations
    // ------------------------------------------------------------------

    /// Run `action` against the active trip. Returns whether anything
    /// changed; refused actions leave the store untouched.
    pub fn apply(&mut self, action: impl Into<TripAction>) -> bool {
        let action = action.into();
        let Some(idx) = self
            .trips
            .iter()
            .position(|t| t.id == self.active_trip_id)
        else {
            return false;
        };

        match action.reduce(&self.trips[idx]) {
            Some(mut next) => {
                next.updated_at = Utc::now().max(self.trips[idx].updated_at);
                debug!(trip_id = %next.id, slice = action.label(), ?action, "action applied");
                self.trips[idx] = Arc::new(next);
                true
            }
            None => {
                debug!(slice = action.label(), ?action, "action refused");
                false
            }
        }
    }
}

// ----------------------------------------------------------------------
// Copy-on-write helpers shared by the slices
// ----------------------------------------------------------------------

/// Clone `trip` (shallowly) and edit one day in place. `edit` returns
/// `false` to abandon the update.
pub(crate) fn with_day<F>(trip: &Trip, day_id: &str, edit: F) -> Option<Trip>
where
    F: FnOnce(&mut DayPlan) -> bool,
{
    let idx = trip.day_index(day_id)?;
    let mut next = trip.clone();
    if !edit(Arc::make_mut(&mut next.days[idx])) {
        return None;
    }
    Some(next)
}

/// Same as [`with_day`], one level deeper.
pub(crate) fn with_activity<F>(trip: &Trip, day_id: &str, activity_id: &str, edit: F) -> Option<Trip>
where
    F: FnOnce(&mut ScheduledActivity) -> bool,
{
    with_day(trip, day_id, |day| {
        let Some(idx) = day.activity_index(activity_id) else {
            return false;
        };
        edit(Arc::make_mut(&mut day.activities[idx]))
    })
}

/// Move an element from `from` to `to` (remove-then-insert). Out of range
/// or identical indices are rejected.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() || from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
