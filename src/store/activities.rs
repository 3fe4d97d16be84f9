//! Activity slice.
//!
//! Start times belong to the slot, not to the activity: reordering within a
//! day moves names, costs, flags… but every position keeps the `time` it
//! had before the move.

use super::{move_item, with_activity, with_day};
use crate::models::{
    ActivityCategory, BookingInfo, Coordinates, MediaAttachment, ScheduledActivity, Trip, new_id,
};
use crate::money::round_to_persisted;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ActivityAction {
    Add {
        day_id: String,
        activity: ScheduledActivity,
        index: Option<usize>,
    },
    Update {
        day_id: String,
        activity_id: String,
        patch: ActivityPatch,
    },
    Remove {
        day_id: String,
        activity_id: String,
    },
    Reorder {
        day_id: String,
        from: usize,
        to: usize,
    },
    /// Move to another day (keeps its own time there).
    MoveToDay {
        from_day_id: String,
        activity_id: String,
        to_day_id: String,
        index: Option<usize>,
    },
    ToggleCompleted {
        day_id: String,
        activity_id: String,
    },
    ToggleSkipped {
        day_id: String,
        activity_id: String,
    },
    AddMemo {
        day_id: String,
        activity_id: String,
        memo: String,
    },
    RemoveMemo {
        day_id: String,
        activity_id: String,
        index: usize,
    },
    AddMedia {
        day_id: String,
        activity_id: String,
        media: MediaAttachment,
    },
    RemoveMedia {
        day_id: String,
        activity_id: String,
        media_id: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub name_local: Option<String>,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub category: Option<ActivityCategory>,
    pub estimated_cost: Option<f64>,
    pub booking: Option<BookingInfo>,
    pub coordinates: Option<Coordinates>,
}

pub fn reduce(trip: &Trip, action: &ActivityAction) -> Option<Trip> {
    match action {
        ActivityAction::Add {
            day_id,
            activity,
            index,
        } => {
            if !activity.estimated_cost.is_finite() {
                return None;
            }
            with_day(trip, day_id, |day| {
                let mut activity = activity.clone();
                if activity.id.is_empty() || day.activity_index(&activity.id).is_some() {
                    activity.id = new_id();
                }
                activity.estimated_cost = round_to_persisted(activity.estimated_cost);
                let activity = Arc::new(activity);
                match index {
                    Some(i) if *i < day.activities.len() => day.activities.insert(*i, activity),
                    _ => day.activities.push(activity),
                }
                true
            })
        }

        ActivityAction::Update {
            day_id,
            activity_id,
            patch,
        } => {
            if patch.estimated_cost.is_some_and(|c| !c.is_finite()) {
                return None;
            }
            with_activity(trip, day_id, activity_id, |a| apply_patch(a, patch))
        }

        ActivityAction::Remove {
            day_id,
            activity_id,
        } => with_day(trip, day_id, |day| {
            let before = day.activities.len();
            day.activities.retain(|a| &a.id != activity_id);
            day.activities.len() != before
        }),

        ActivityAction::Reorder { day_id, from, to } => {
            with_day(trip, day_id, |day| reorder_keeping_slots(&mut day.activities, *from, *to))
        }

        ActivityAction::MoveToDay {
            from_day_id,
            activity_id,
            to_day_id,
            index,
        } => move_to_day(trip, from_day_id, activity_id, to_day_id, *index),

        ActivityAction::ToggleCompleted {
            day_id,
            activity_id,
        } => with_activity(trip, day_id, activity_id, |a| {
            a.completed = !a.completed;
            if a.completed {
                a.skipped = false;
            }
            true
        }),

        ActivityAction::ToggleSkipped {
            day_id,
            activity_id,
        } => with_activity(trip, day_id, activity_id, |a| {
            a.skipped = !a.skipped;
            if a.skipped {
                a.completed = false;
            }
            true
        }),

        ActivityAction::AddMemo {
            day_id,
            activity_id,
            memo,
        } => {
            if memo.trim().is_empty() {
                return None;
            }
            with_activity(trip, day_id, activity_id, |a| {
                a.memos.push(memo.trim().to_string());
                true
            })
        }

        ActivityAction::RemoveMemo {
            day_id,
            activity_id,
            index,
        } => with_activity(trip, day_id, activity_id, |a| {
            if *index >= a.memos.len() {
                return false;
            }
            a.memos.remove(*index);
            true
        }),

        ActivityAction::AddMedia {
            day_id,
            activity_id,
            media,
        } => with_activity(trip, day_id, activity_id, |a| {
            let mut media = media.clone();
            if media.id.is_empty() {
                media.id = new_id();
            }
            a.media.push(media);
            true
        }),

        ActivityAction::RemoveMedia {
            day_id,
            activity_id,
            media_id,
        } => with_activity(trip, day_id, activity_id, |a| {
            let before = a.media.len();
            a.media.retain(|m| &m.id != media_id);
            a.media.len() != before
        }),
    }
}

fn apply_patch(a: &mut ScheduledActivity, patch: &ActivityPatch) -> bool {
    let mut changed = false;
    if let Some(v) = &patch.name {
        a.name = v.clone();
        changed = true;
    }
    if let Some(v) = &patch.name_local {
        a.name_local = Some(v.clone());
        changed = true;
    }
    if let Some(v) = &patch.time {
        a.time = v.clone();
        changed = true;
    }
    if let Some(v) = &patch.duration {
        a.duration = v.clone();
        changed = true;
    }
    if let Some(v) = patch.category {
        a.category = v;
        changed = true;
    }
    if let Some(v) = patch.estimated_cost {
        a.estimated_cost = round_to_persisted(v);
        changed = true;
    }
    if let Some(v) = &patch.booking {
        a.booking = Some(v.clone());
        changed = true;
    }
    if let Some(v) = patch.coordinates {
        a.coordinates = Some(v);
        changed = true;
    }
    changed
}

/// Remove-then-insert, then hand every position back its original time.
pub(crate) fn reorder_keeping_slots(
    activities: &mut Vec<Arc<ScheduledActivity>>,
    from: usize,
    to: usize,
) -> bool {
    let slots: Vec<String> = activities.iter().map(|a| a.time.clone()).collect();
    if !move_item(activities, from, to) {
        return false;
    }
    for (activity, slot) in activities.iter_mut().zip(slots) {
        if activity.time != slot {
            Arc::make_mut(activity).time = slot;
        }
    }
    true
}

fn move_to_day(
    trip: &Trip,
    from_day_id: &str,
    activity_id: &str,
    to_day_id: &str,
    index: Option<usize>,
) -> Option<Trip> {
    let from_idx = trip.day_index(from_day_id)?;
    let to_idx = trip.day_index(to_day_id)?;
    let pos = trip.days[from_idx].activity_index(activity_id)?;

    if from_idx == to_idx {
        let to = index.unwrap_or(trip.days[from_idx].activities.len().saturating_sub(1));
        return with_day(trip, from_day_id, |day| {
            reorder_keeping_slots(&mut day.activities, pos, to)
        });
    }

    let mut next = trip.clone();
    let moved = Arc::make_mut(&mut next.days[from_idx]).activities.remove(pos);
    let target = Arc::make_mut(&mut next.days[to_idx]);
    match index {
        Some(i) if i < target.activities.len() => target.activities.insert(i, moved),
        _ => target.activities.push(moved),
    }
    Some(next)
}
