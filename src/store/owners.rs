//! Owner slice. `shared` can be renamed/recoloured but never removed.

use crate::models::{OwnerConfig, OwnerId, Trip, new_id};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum OwnerAction {
    Add(OwnerConfig),
    Update {
        owner_id: OwnerId,
        name: Option<String>,
        color: Option<String>,
    },
    /// Reassigns the owner's expenses (global and per activity) to `shared`
    /// and drops the owner, in one update.
    Remove {
        owner_id: OwnerId,
    },
}

pub fn reduce(trip: &Trip, action: &OwnerAction) -> Option<Trip> {
    match action {
        OwnerAction::Add(owner) => {
            if owner.id.is_shared() || owner.id.is_known(&trip.owners) {
                return None;
            }
            let mut owner = owner.clone();
            if owner.id.as_str().is_empty() {
                owner.id = OwnerId::new(new_id());
            }
            let mut next = trip.clone();
            next.owners.push(owner);
            Some(next)
        }

        OwnerAction::Update {
            owner_id,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                return None;
            }
            let idx = trip.owners.iter().position(|o| &o.id == owner_id)?;
            let mut next = trip.clone();
            if let Some(n) = name {
                next.owners[idx].name = n.clone();
            }
            if let Some(c) = color {
                next.owners[idx].color = c.clone();
            }
            Some(next)
        }

        OwnerAction::Remove { owner_id } => remove_owner(trip, owner_id),
    }
}

fn remove_owner(trip: &Trip, owner_id: &OwnerId) -> Option<Trip> {
    if owner_id.is_shared() || !owner_id.is_known(&trip.owners) {
        return None;
    }

    let mut next = trip.clone();

    for e in next.expenses.iter_mut().filter(|e| &e.owner == owner_id) {
        e.owner = OwnerId::shared();
    }

    // only days/activities that actually hold the owner's expenses are cloned
    for day in &mut next.days {
        let touches = day
            .activities
            .iter()
            .any(|a| a.expenses.iter().any(|e| &e.owner == owner_id));
        if !touches {
            continue;
        }
        for activity in &mut Arc::make_mut(day).activities {
            if !activity.expenses.iter().any(|e| &e.owner == owner_id) {
                continue;
            }
            for e in Arc::make_mut(activity)
                .expenses
                .iter_mut()
                .filter(|e| &e.owner == owner_id)
            {
                e.owner = OwnerId::shared();
            }
        }
    }

    next.owners.retain(|o| &o.id != owner_id);
    Some(next)
}
