use rtripplanner::aggregate::{
    OwnerFilter, PairOutcome, SETTLEMENT_EPSILON, Settlement, budget_remaining, day_actual_cost,
    day_breakdown, day_estimated_cost, fair_shares, settle, total_actual_expenses,
    total_expenses_by_owner,
};
use rtripplanner::models::{
    ActivityCategory, ActivityExpense, Expense, NewTrip, OwnerConfig, OwnerId, ScheduledActivity,
    Trip,
};
use rtripplanner::store::{ActivityAction, DayAction, ExpenseAction, OwnerAction, TripStore};

fn trip_with_owners(names: &[&str]) -> TripStore {
    let mut store = TripStore::new(Trip::new(NewTrip {
        name: "Split".into(),
        total_budget: 1000.0,
        ..NewTrip::default()
    }));
    for name in names {
        assert!(store.apply(OwnerAction::Add(OwnerConfig {
            id: OwnerId::new(name.to_lowercase()),
            name: (*name).into(),
            color: "#123456".into(),
        })));
    }
    store
}

fn spend(store: &mut TripStore, owner: &str, amount: f64) {
    assert!(store.apply(ExpenseAction::Add(Expense::new(
        amount,
        "KRW",
        "x",
        OwnerId::new(owner)
    ))));
}

#[test]
fn test_pair_settlement_alice_and_bob() {
    let mut store = trip_with_owners(&["Alice", "Bob"]);
    spend(&mut store, "alice", 120.0);
    spend(&mut store, "shared", 200.0);
    spend(&mut store, "bob", 80.0);
    let trip = store.active_trip();

    let shares = fair_shares(trip);
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].owner, OwnerId::new("alice"));
    assert_eq!(shares[0].shared_portion, 100.0);
    assert_eq!(shares[0].total, 220.0);
    assert_eq!(shares[1].total, 180.0);

    match settle(trip) {
        Some(Settlement::Pair {
            outcome: PairOutcome::Transfer { from, to, amount },
            ..
        }) => {
            assert_eq!(from, OwnerId::new("bob"));
            assert_eq!(to, OwnerId::new("alice"));
            assert_eq!(amount, 20.0);
        }
        other => panic!("unexpected settlement: {other:?}"),
    }
}

#[test]
fn test_fair_shares_add_up_to_all_expenses() {
    let mut store = trip_with_owners(&["Alice", "Bob", "Chloe"]);
    spend(&mut store, "alice", 33.33);
    spend(&mut store, "bob", 12.5);
    spend(&mut store, "shared", 100.0);
    spend(&mut store, "chloe", 7.0);
    let trip = store.active_trip();

    let sum: f64 = fair_shares(trip).iter().map(|s| s.total).sum();
    assert!((sum - total_actual_expenses(trip)).abs() < 1e-4);
}

#[test]
fn test_pair_within_epsilon_is_settled() {
    let mut store = trip_with_owners(&["Alice", "Bob"]);
    spend(&mut store, "alice", 50.0);
    spend(&mut store, "bob", 50.0 + SETTLEMENT_EPSILON / 2.0);

    assert!(matches!(
        settle(store.active_trip()),
        Some(Settlement::Pair {
            outcome: PairOutcome::Settled,
            ..
        })
    ));
}

#[test]
fn test_single_owner_carries_everything() {
    let mut store = trip_with_owners(&["Alice"]);
    spend(&mut store, "alice", 10.0);
    spend(&mut store, "shared", 40.0);

    match settle(store.active_trip()) {
        Some(Settlement::Single(share)) => {
            assert_eq!(share.owner, OwnerId::new("alice"));
            assert_eq!(share.total, 50.0);
        }
        other => panic!("unexpected settlement: {other:?}"),
    }
}

#[test]
fn test_no_real_owners_means_no_settlement() {
    let mut store = trip_with_owners(&[]);
    spend(&mut store, "shared", 40.0);

    assert!(fair_shares(store.active_trip()).is_empty());
    assert_eq!(settle(store.active_trip()), None);
}

#[test]
fn test_group_reports_deviation_from_mean() {
    let mut store = trip_with_owners(&["Alice", "Bob", "Chloe"]);
    spend(&mut store, "alice", 90.0);
    spend(&mut store, "bob", 30.0);
    spend(&mut store, "shared", 30.0);

    match settle(store.active_trip()) {
        Some(Settlement::Group {
            mean, deviations, ..
        }) => {
            // fair shares: 100, 40, 10
            assert_eq!(mean, 50.0);
            assert_eq!(
                deviations,
                vec![
                    (OwnerId::new("alice"), 50.0),
                    (OwnerId::new("bob"), -10.0),
                    (OwnerId::new("chloe"), -40.0),
                ]
            );
            let net: f64 = deviations.iter().map(|(_, d)| d).sum();
            assert!(net.abs() < 1e-6);
        }
        other => panic!("unexpected settlement: {other:?}"),
    }
}

#[test]
fn test_day_costs_include_linked_global_expenses() {
    let mut store = trip_with_owners(&["Alice"]);
    assert!(store.apply(DayAction::Add {
        date: None,
        destination: "Osaka".into(),
        index: None,
    }));
    let day_id = store.active_trip().days[0].id.clone();

    let mut act = ScheduledActivity::new("Castle", ActivityCategory::Attraction);
    act.estimated_cost = 60.0;
    let act_id = act.id.clone();
    assert!(store.apply(ActivityAction::Add {
        day_id: day_id.clone(),
        activity: act,
        index: None,
    }));
    assert!(store.apply(ExpenseAction::AddToActivity {
        day_id: day_id.clone(),
        activity_id: act_id,
        expense: ActivityExpense::new(55.0, "KRW", "ticket", OwnerId::new("alice")),
    }));
    assert!(store.apply(ExpenseAction::Add(
        Expense::new(20.0, "KRW", "lunch", OwnerId::shared()).on_day(day_id.clone())
    )));
    spend(&mut store, "shared", 5.0);

    let trip = store.active_trip();
    assert_eq!(day_estimated_cost(trip, &day_id), 60.0);
    assert_eq!(day_actual_cost(trip, &day_id), 75.0);
    assert_eq!(total_actual_expenses(trip), 80.0);
    assert_eq!(
        total_expenses_by_owner(trip, &OwnerFilter::Owner(OwnerId::new("alice"))),
        55.0
    );
    assert_eq!(budget_remaining(trip), 920.0);

    let rows = day_breakdown(trip);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].day_number, 1);
    assert_eq!(rows[0].actual, 75.0);
}

#[test]
fn test_unknown_day_costs_nothing() {
    let store = trip_with_owners(&[]);
    assert_eq!(day_estimated_cost(store.active_trip(), "nope"), 0.0);
    assert_eq!(day_actual_cost(store.active_trip(), "nope"), 0.0);
}

#[test]
fn test_budget_remaining_goes_negative_when_over_budget() {
    let mut store = trip_with_owners(&[]);
    spend(&mut store, "shared", 1250.0);
    assert_eq!(budget_remaining(store.active_trip()), -250.0);
}
