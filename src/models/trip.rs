use super::day::DayPlan;
use super::de;
use super::expense::{Expense, PendingExpense};
use super::owner::{OwnerConfig, OwnerId, normalize_owners};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One travel plan.
///
/// Days are `Arc`-shared between successive versions of the trip; a
/// mutation only clones the day it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, alias = "tripName")]
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days: Vec<Arc<DayPlan>>,
    #[serde(default, alias = "currentDay")]
    pub current_day_index: usize,
    /// Base currency.
    #[serde(default, deserialize_with = "de::number")]
    pub total_budget: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub restaurant_comments: Vec<RestaurantComment>,
    #[serde(default, alias = "customDestinations")]
    pub destinations: Vec<Destination>,
    #[serde(default, alias = "immigrationSchedules")]
    pub immigration_schedules: Vec<ImmigrationSchedule>,
    #[serde(default, alias = "transports")]
    pub transport_legs: Vec<TransportLeg>,
    #[serde(default)]
    pub owners: Vec<OwnerConfig>,
    #[serde(default)]
    pub pending_camera_expense: Option<PendingExpense>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Input for `TripStore::create_trip`.
#[derive(Debug, Clone, Default)]
pub struct NewTrip {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_budget: f64,
    /// When true (and both dates are set) one day per calendar date is created.
    pub generate_days: bool,
}

impl Trip {
    /// Empty trip with the `shared` owner seeded.
    pub fn new(spec: NewTrip) -> Self {
        let now = Utc::now();
        let mut trip = Self {
            id: super::new_id(),
            name: spec.name,
            start_date: spec.start_date,
            end_date: spec.end_date,
            days: Vec::new(),
            current_day_index: 0,
            total_budget: spec.total_budget,
            expenses: Vec::new(),
            restaurant_comments: Vec::new(),
            destinations: Vec::new(),
            immigration_schedules: Vec::new(),
            transport_legs: Vec::new(),
            owners: vec![OwnerConfig::shared()],
            pending_camera_expense: None,
            created_at: now,
            updated_at: now,
        };

        if spec.generate_days
            && let (Some(start), Some(end)) = (trip.start_date, trip.end_date)
        {
            let mut d = start;
            while d <= end {
                trip.days.push(Arc::new(DayPlan::new(Some(d), "")));
                match d.succ_opt() {
                    Some(next) => d = next,
                    None => break,
                }
            }
            trip.renumber_days();
        }

        trip
    }

    pub fn day(&self, day_id: &str) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.id == day_id).map(|d| d.as_ref())
    }

    pub fn day_index(&self, day_id: &str) -> Option<usize> {
        self.days.iter().position(|d| d.id == day_id)
    }

    /// Lookup by 1-based day number.
    pub fn day_by_number(&self, number: u32) -> Option<&DayPlan> {
        self.days
            .iter()
            .find(|d| d.day_number == number)
            .map(|d| d.as_ref())
    }

    pub fn owner(&self, id: &OwnerId) -> Option<&OwnerConfig> {
        self.owners.iter().find(|o| &o.id == id)
    }

    /// Rewrite `day_number` as `1..N` in list order. Days whose number is
    /// already right stay shared.
    pub fn renumber_days(&mut self) {
        for (i, day) in self.days.iter_mut().enumerate() {
            let expected = (i + 1) as u32;
            if day.day_number != expected {
                Arc::make_mut(day).day_number = expected;
            }
        }
        if self.current_day_index >= self.days.len() {
            self.current_day_index = self.days.len().saturating_sub(1);
        }
    }

    /// Keep `end_date` on the last dated day.
    pub(crate) fn sync_end_date(&mut self) {
        if let Some(last) = self.days.iter().rev().find_map(|d| d.date) {
            self.end_date = Some(last);
            if self.start_date.is_none_or(|s| s > last) {
                self.start_date = self.days.iter().find_map(|d| d.date);
            }
        }
    }

    /// Restore model invariants on data coming from outside (imports,
    /// database rows): shared owner, day numbering, rounded amounts, ids.
    /// Expenses billed to an owner missing from `owners` move to `shared`.
    pub fn normalize(&mut self) {
        normalize_owners(&mut self.owners);
        let owners = &self.owners;
        let unknown = |owner: &OwnerId| !owner.is_known(owners);

        for e in &mut self.expenses {
            if e.id.is_empty() {
                e.id = super::new_id();
            }
            if unknown(&e.owner) {
                e.owner = OwnerId::shared();
            }
            e.amount = crate::money::round_to_persisted(e.amount);
        }
        for day in &mut self.days {
            let needs_fix = day.id.is_empty()
                || day.activities.iter().any(|a| {
                    a.id.is_empty()
                        || a.expenses.iter().any(|e| {
                            e.id.is_empty()
                                || unknown(&e.owner)
                                || e.amount != crate::money::round_to_persisted(e.amount)
                        })
                });
            if !needs_fix {
                continue;
            }
            let day = Arc::make_mut(day);
            if day.id.is_empty() {
                day.id = super::new_id();
            }
            for act in &mut day.activities {
                let act = Arc::make_mut(act);
                if act.id.is_empty() {
                    act.id = super::new_id();
                }
                for e in &mut act.expenses {
                    if e.id.is_empty() {
                        e.id = super::new_id();
                    }
                    if unknown(&e.owner) {
                        e.owner = OwnerId::shared();
                    }
                    e.amount = crate::money::round_to_persisted(e.amount);
                }
            }
        }
        self.renumber_days();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantComment {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub restaurant: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// User-defined destination (city / region) days can point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImmigrationDirection {
    #[default]
    Departure,
    Arrival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmigrationSchedule {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, alias = "type")]
    pub direction: ImmigrationDirection,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub airport: String,
    #[serde(default)]
    pub flight_number: String,
}

/// Inter-city transport leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportLeg {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "de::number")]
    pub cost: f64,
}
