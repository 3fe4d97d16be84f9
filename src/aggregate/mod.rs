//! Read-only derived values: costs, totals, settlement.

pub mod costs;
pub mod settlement;

pub use costs::{
    DayCostRow, OwnerFilter, budget_remaining, day_actual_cost, day_breakdown,
    day_estimated_cost, total_actual_expenses, total_estimated_cost, total_expenses_by_owner,
};
pub use settlement::{FairShare, PairOutcome, SETTLEMENT_EPSILON, Settlement, fair_shares, settle};
