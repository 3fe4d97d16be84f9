//! Cost splitting between the real (non-`shared`) owners of a trip.
//!
//! fair share = personal expenses + shared pool / number of real owners
//!
//! Two owners get a single equalising transfer; larger groups get each
//! owner's deviation from the mean fair share (a balance report, not a
//! minimal set of transfers).

use super::costs::{OwnerFilter, total_expenses_by_owner};
use crate::models::{OwnerId, Trip};
use crate::money::round_to_persisted;

/// Differences at or below this are considered settled.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct FairShare {
    pub owner: OwnerId,
    pub personal: f64,
    pub shared_portion: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Settled,
    /// `from` owes `to` `amount`.
    Transfer {
        from: OwnerId,
        to: OwnerId,
        amount: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Only one real owner: nothing to balance.
    Single(FairShare),
    Pair {
        shares: [FairShare; 2],
        outcome: PairOutcome,
    },
    Group {
        shares: Vec<FairShare>,
        mean: f64,
        /// Positive: above the mean.
        deviations: Vec<(OwnerId, f64)>,
    },
}

/// Fair share of every non-shared owner, in owner-list order.
pub fn fair_shares(trip: &Trip) -> Vec<FairShare> {
    let real: Vec<&OwnerId> = trip
        .owners
        .iter()
        .map(|o| &o.id)
        .filter(|id| !id.is_shared())
        .collect();
    if real.is_empty() {
        return Vec::new();
    }

    let shared_total = total_expenses_by_owner(trip, &OwnerFilter::Owner(OwnerId::shared()));
    let shared_portion = shared_total / real.len() as f64;

    real.into_iter()
        .map(|id| {
            let personal = total_expenses_by_owner(trip, &OwnerFilter::Owner(id.clone()));
            FairShare {
                owner: id.clone(),
                personal,
                shared_portion: round_to_persisted(shared_portion),
                total: round_to_persisted(personal + shared_portion),
            }
        })
        .collect()
}

/// `None` when the trip has no real owners.
pub fn settle(trip: &Trip) -> Option<Settlement> {
    let mut shares = fair_shares(trip);

    match shares.len() {
        0 => None,
        1 => shares.pop().map(Settlement::Single),
        2 => {
            let (b, a) = (shares.pop()?, shares.pop()?);
            let outcome = settle_pair(&a, &b);
            Some(Settlement::Pair {
                shares: [a, b],
                outcome,
            })
        }
        n => {
            let mean = shares.iter().map(|s| s.total).sum::<f64>() / n as f64;
            let deviations = shares
                .iter()
                .map(|s| (s.owner.clone(), round_to_persisted(s.total - mean)))
                .collect();
            Some(Settlement::Group {
                shares,
                mean: round_to_persisted(mean),
                deviations,
            })
        }
    }
}

fn settle_pair(a: &FairShare, b: &FairShare) -> PairOutcome {
    let diff = a.total - b.total;
    if diff.abs() <= SETTLEMENT_EPSILON {
        return PairOutcome::Settled;
    }
    let (to, from) = if diff > 0.0 { (a, b) } else { (b, a) };
    PairOutcome::Transfer {
        from: from.owner.clone(),
        to: to.owner.clone(),
        amount: round_to_persisted(diff.abs() / 2.0),
    }
}
