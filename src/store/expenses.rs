//! Expense slice: global expenses, activity expenses, pending camera value.
//!
//! Amounts arrive already converted to the base currency and are rounded to
//! 6 decimals here. Writes naming an owner that is not in the trip's owner
//! list, or a day the trip does not have, are refused.

use super::with_activity;
use crate::models::{
    ActivityExpense, Expense, ExpenseCategory, OwnerId, PendingExpense, Trip, new_id,
};
use crate::money::round_to_persisted;

#[derive(Debug, Clone)]
pub enum ExpenseAction {
    Add(Expense),
    Update {
        expense_id: String,
        patch: ExpensePatch,
    },
    Remove {
        expense_id: String,
    },
    AddToActivity {
        day_id: String,
        activity_id: String,
        expense: ActivityExpense,
    },
    UpdateOnActivity {
        day_id: String,
        activity_id: String,
        expense_id: String,
        patch: ExpensePatch,
    },
    RemoveFromActivity {
        day_id: String,
        activity_id: String,
        expense_id: String,
    },
    SetPending(Option<PendingExpense>),
}

/// Partial update. `day_id: Some(None)` unlinks a global expense from its
/// day; `day_id` and `category` are ignored for activity expenses.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub owner: Option<OwnerId>,
    pub day_id: Option<Option<String>>,
    pub category: Option<ExpenseCategory>,
}

fn valid_amount(amount: f64) -> bool {
    amount.is_finite()
}

fn valid_patch(trip: &Trip, patch: &ExpensePatch) -> bool {
    if patch.amount.is_some_and(|a| !valid_amount(a)) {
        return false;
    }
    if let Some(owner) = &patch.owner
        && !owner.is_known(&trip.owners)
    {
        return false;
    }
    if let Some(Some(day_id)) = &patch.day_id
        && trip.day(day_id).is_none()
    {
        return false;
    }
    true
}

pub fn reduce(trip: &Trip, action: &ExpenseAction) -> Option<Trip> {
    match action {
        ExpenseAction::Add(expense) => {
            if !valid_amount(expense.amount) || !expense.owner.is_known(&trip.owners) {
                return None;
            }
            if let Some(day_id) = &expense.day_id
                && trip.day(day_id).is_none()
            {
                return None;
            }
            let mut expense = expense.clone();
            if expense.id.is_empty() || trip.expenses.iter().any(|e| e.id == expense.id) {
                expense.id = new_id();
            }
            expense.amount = round_to_persisted(expense.amount);

            let mut next = trip.clone();
            next.expenses.push(expense);
            Some(next)
        }

        ExpenseAction::Update { expense_id, patch } => {
            if !valid_patch(trip, patch) {
                return None;
            }
            let idx = trip.expenses.iter().position(|e| &e.id == expense_id)?;
            let mut next = trip.clone();
            let e = &mut next.expenses[idx];
            if let Some(a) = patch.amount {
                e.amount = round_to_persisted(a);
            }
            if let Some(c) = &patch.currency {
                e.currency = c.clone();
            }
            if let Some(d) = &patch.description {
                e.description = d.clone();
            }
            if let Some(o) = &patch.owner {
                e.owner = o.clone();
            }
            if let Some(day) = &patch.day_id {
                e.day_id = day.clone();
            }
            if let Some(c) = patch.category {
                e.category = Some(c);
            }
            Some(next)
        }

        ExpenseAction::Remove { expense_id } => {
            let idx = trip.expenses.iter().position(|e| &e.id == expense_id)?;
            let mut next = trip.clone();
            next.expenses.remove(idx);
            Some(next)
        }

        ExpenseAction::AddToActivity {
            day_id,
            activity_id,
            expense,
        } => {
            if !valid_amount(expense.amount) || !expense.owner.is_known(&trip.owners) {
                return None;
            }
            with_activity(trip, day_id, activity_id, |a| {
                let mut expense = expense.clone();
                if expense.id.is_empty() || a.expenses.iter().any(|e| e.id == expense.id) {
                    expense.id = new_id();
                }
                expense.amount = round_to_persisted(expense.amount);
                a.expenses.push(expense);
                true
            })
        }

        ExpenseAction::UpdateOnActivity {
            day_id,
            activity_id,
            expense_id,
            patch,
        } => {
            if !valid_patch(trip, patch) {
                return None;
            }
            with_activity(trip, day_id, activity_id, |a| {
                let Some(e) = a.expenses.iter_mut().find(|e| &e.id == expense_id) else {
                    return false;
                };
                if let Some(v) = patch.amount {
                    e.amount = round_to_persisted(v);
                }
                if let Some(c) = &patch.currency {
                    e.currency = c.clone();
                }
                if let Some(d) = &patch.description {
                    e.description = d.clone();
                }
                if let Some(o) = &patch.owner {
                    e.owner = o.clone();
                }
                true
            })
        }

        ExpenseAction::RemoveFromActivity {
            day_id,
            activity_id,
            expense_id,
        } => with_activity(trip, day_id, activity_id, |a| {
            let before = a.expenses.len();
            a.expenses.retain(|e| &e.id != expense_id);
            a.expenses.len() != before
        }),

        ExpenseAction::SetPending(pending) => {
            if &trip.pending_camera_expense == pending {
                return None;
            }
            let mut next = trip.clone();
            next.pending_camera_expense = pending.clone();
            Some(next)
        }
    }
}
