use chrono::NaiveDate;
use rtripplanner::aggregate::{OwnerFilter, total_actual_expenses, total_estimated_cost, total_expenses_by_owner};
use rtripplanner::models::{
    ActivityCategory, ActivityExpense, Expense, NewTrip, OwnerConfig, OwnerId, ScheduledActivity,
    Trip,
};
use rtripplanner::store::{
    ActivityAction, DayAction, ExpenseAction, OwnerAction, TripInfoAction, TripStore,
};
use std::sync::Arc;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn store_with_days(n: u32) -> TripStore {
    let start = date("2025-04-01");
    let end = start + chrono::Duration::days(i64::from(n) - 1);
    TripStore::new(Trip::new(NewTrip {
        name: "Tokyo".into(),
        start_date: Some(start),
        end_date: Some(end),
        total_budget: 1000.0,
        generate_days: true,
    }))
}

fn day_id(store: &TripStore, number: u32) -> String {
    store.active_trip().day_by_number(number).unwrap().id.clone()
}

fn assert_numbered(store: &TripStore) {
    let numbers: Vec<u32> = store.active_trip().days.iter().map(|d| d.day_number).collect();
    let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
    assert_eq!(numbers, expected);
}

fn add_owner(store: &mut TripStore, id: &str, name: &str) -> OwnerId {
    let owner = OwnerConfig {
        id: OwnerId::new(id),
        name: name.into(),
        color: "#000".into(),
    };
    assert!(store.apply(OwnerAction::Add(owner)));
    OwnerId::new(id)
}

fn add_activity(store: &mut TripStore, day: u32, name: &str, time: &str, cost: f64) -> String {
    let mut a = ScheduledActivity::new(name, ActivityCategory::Attraction);
    a.time = time.into();
    a.estimated_cost = cost;
    let id = a.id.clone();
    let day_id = day_id(store, day);
    assert!(store.apply(ActivityAction::Add {
        day_id,
        activity: a,
        index: None,
    }));
    id
}

#[test]
fn test_new_trip_generates_one_day_per_date() {
    let store = store_with_days(3);
    let trip = store.active_trip();
    assert_eq!(trip.days.len(), 3);
    assert_eq!(trip.days[2].date, Some(date("2025-04-03")));
    assert!(trip.owners[0].id.is_shared());
    assert_numbered(&store);
}

#[test]
fn test_days_stay_numbered_after_every_structural_change() {
    let mut store = store_with_days(3);

    assert!(store.apply(DayAction::Add {
        date: None,
        destination: "Kyoto".into(),
        index: Some(0),
    }));
    assert_numbered(&store);

    let second = day_id(&store, 2);
    assert!(store.apply(DayAction::Remove { day_id: second }));
    assert_numbered(&store);

    assert!(store.apply(DayAction::Reorder { from: 0, to: 2 }));
    assert_numbered(&store);

    assert!(store.apply(DayAction::Add {
        date: None,
        destination: String::new(),
        index: None,
    }));
    assert_numbered(&store);
    assert_eq!(store.active_trip().days.len(), 4);
}

#[test]
fn test_added_day_without_date_follows_last_dated_day() {
    let mut store = store_with_days(2);
    assert!(store.apply(DayAction::Add {
        date: None,
        destination: String::new(),
        index: None,
    }));
    let trip = store.active_trip();
    assert_eq!(trip.days[2].date, Some(date("2025-04-03")));
    assert_eq!(trip.end_date, Some(date("2025-04-03")));
}

#[test]
fn test_removing_day_unlinks_global_expenses() {
    let mut store = store_with_days(2);
    let first = day_id(&store, 1);
    let e = Expense::new(30.0, "KRW", "taxi", OwnerId::shared()).on_day(first.clone());
    let eid = e.id.clone();
    assert!(store.apply(ExpenseAction::Add(e)));

    assert!(store.apply(DayAction::Remove { day_id: first }));

    let trip = store.active_trip();
    let kept = trip.expenses.iter().find(|x| x.id == eid).unwrap();
    assert_eq!(kept.day_id, None);
    assert_eq!(total_actual_expenses(trip), 30.0);
}

#[test]
fn test_untouched_days_are_shared_between_versions() {
    let mut store = store_with_days(3);
    let before = store.active_trip().clone();

    add_activity(&mut store, 2, "Senso-ji", "09:00", 0.0);

    let after = store.active_trip();
    assert!(Arc::ptr_eq(&before.days[0], &after.days[0]));
    assert!(!Arc::ptr_eq(&before.days[1], &after.days[1]));
    assert!(Arc::ptr_eq(&before.days[2], &after.days[2]));
}

#[test]
fn test_reorder_keeps_start_times_with_their_slots() {
    let mut store = store_with_days(1);
    let a = add_activity(&mut store, 1, "A", "09:00", 0.0);
    let b = add_activity(&mut store, 1, "B", "11:00", 0.0);
    let c = add_activity(&mut store, 1, "C", "14:00", 0.0);

    let day = day_id(&store, 1);
    assert!(store.apply(ActivityAction::Reorder {
        day_id: day,
        from: 0,
        to: 2,
    }));

    let plan = &store.active_trip().days[0];
    let order: Vec<&str> = plan.activities.iter().map(|x| x.id.as_str()).collect();
    assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);

    let times: Vec<&str> = plan.activities.iter().map(|x| x.time.as_str()).collect();
    assert_eq!(times, vec!["09:00", "11:00", "14:00"]);
}

#[test]
fn test_reorder_out_of_range_is_a_no_op() {
    let mut store = store_with_days(1);
    add_activity(&mut store, 1, "A", "09:00", 0.0);
    let before = store.clone();

    let day = day_id(&store, 1);
    assert!(!store.apply(ActivityAction::Reorder {
        day_id: day,
        from: 0,
        to: 5,
    }));
    assert_eq!(store, before);
}

#[test]
fn test_completed_and_skipped_are_exclusive() {
    let mut store = store_with_days(1);
    let a = add_activity(&mut store, 1, "A", "09:00", 0.0);
    let day = day_id(&store, 1);

    assert!(store.apply(ActivityAction::ToggleCompleted {
        day_id: day.clone(),
        activity_id: a.clone(),
    }));
    assert!(store.apply(ActivityAction::ToggleSkipped {
        day_id: day,
        activity_id: a,
    }));

    let act = &store.active_trip().days[0].activities[0];
    assert!(act.skipped);
    assert!(!act.completed);
}

#[test]
fn test_move_activity_to_other_day() {
    let mut store = store_with_days(2);
    let a = add_activity(&mut store, 1, "A", "09:00", 25.0);
    let from = day_id(&store, 1);
    let to = day_id(&store, 2);

    assert!(store.apply(ActivityAction::MoveToDay {
        from_day_id: from,
        activity_id: a.clone(),
        to_day_id: to,
        index: None,
    }));

    let trip = store.active_trip();
    assert!(trip.days[0].activities.is_empty());
    assert_eq!(trip.days[1].activities[0].id, a);
    assert_eq!(total_estimated_cost(trip), 25.0);
}

#[test]
fn test_removing_owner_moves_expenses_to_shared() {
    let mut store = store_with_days(1);
    let alice = add_owner(&mut store, "alice", "Alice");
    let act = add_activity(&mut store, 1, "Dinner", "19:00", 0.0);
    let day = day_id(&store, 1);

    assert!(store.apply(ExpenseAction::Add(Expense::new(
        120.0,
        "KRW",
        "hotel",
        alice.clone()
    ))));
    assert!(store.apply(ExpenseAction::AddToActivity {
        day_id: day,
        activity_id: act,
        expense: ActivityExpense::new(40.0, "KRW", "sushi", alice.clone()),
    }));
    assert!(store.apply(ExpenseAction::Add(Expense::new(
        60.0,
        "KRW",
        "metro",
        OwnerId::shared()
    ))));

    let total_before = total_actual_expenses(store.active_trip());
    assert!(store.apply(OwnerAction::Remove {
        owner_id: alice.clone()
    }));

    let trip = store.active_trip();
    assert_eq!(total_actual_expenses(trip), total_before);
    assert_eq!(total_expenses_by_owner(trip, &OwnerFilter::Owner(alice.clone())), 0.0);
    assert_eq!(total_expenses_by_owner(trip, &OwnerFilter::Owner(OwnerId::shared())), 220.0);
    assert!(trip.owner(&alice).is_none());
}

#[test]
fn test_shared_owner_cannot_be_removed() {
    let mut store = store_with_days(1);
    let owners_before = store.active_trip().owners.clone();

    assert!(!store.apply(OwnerAction::Remove {
        owner_id: OwnerId::shared()
    }));
    assert_eq!(store.active_trip().owners, owners_before);
}

#[test]
fn test_expense_with_unknown_owner_or_day_is_refused() {
    let mut store = store_with_days(1);
    let before = store.clone();

    assert!(!store.apply(ExpenseAction::Add(Expense::new(
        10.0,
        "KRW",
        "ghost",
        OwnerId::new("nobody")
    ))));
    assert!(!store.apply(ExpenseAction::Add(
        Expense::new(10.0, "KRW", "lost", OwnerId::shared()).on_day("missing-day")
    )));
    assert!(!store.apply(ExpenseAction::Add(Expense::new(
        f64::NAN,
        "KRW",
        "nan",
        OwnerId::shared()
    ))));
    assert_eq!(store, before);
}

#[test]
fn test_amounts_are_rounded_to_six_decimals() {
    let mut store = store_with_days(1);
    assert!(store.apply(ExpenseAction::Add(Expense::new(
        10.123456789,
        "KRW",
        "x",
        OwnerId::shared()
    ))));
    assert_eq!(store.active_trip().expenses[0].amount, 10.123457);
}

#[test]
fn test_delete_last_trip_is_a_no_op() {
    let mut store = store_with_days(2);
    let before = store.clone();
    let id = store.active_trip_id().to_string();

    assert!(!store.delete_trip(&id));
    assert_eq!(store, before);
}

#[test]
fn test_delete_active_trip_activates_first_remaining() {
    let mut store = store_with_days(1);
    let first = store.active_trip_id().to_string();
    let second = store.create_trip(NewTrip {
        name: "Osaka".into(),
        ..NewTrip::default()
    });
    assert_eq!(store.active_trip_id(), second);

    assert!(store.delete_trip(&second));
    assert_eq!(store.active_trip_id(), first);
    assert_eq!(store.trips().len(), 1);
}

#[test]
fn test_switch_to_unknown_trip_keeps_selection() {
    let mut store = store_with_days(1);
    let active = store.active_trip_id().to_string();
    assert!(!store.switch_trip("does-not-exist"));
    assert_eq!(store.active_trip_id(), active);
}

#[test]
fn test_mutations_only_touch_the_active_trip() {
    let mut store = store_with_days(1);
    let first = store.active_trip_id().to_string();
    store.create_trip(NewTrip {
        name: "Busan".into(),
        ..NewTrip::default()
    });
    assert!(store.apply(TripInfoAction::Update {
        name: Some("Busan 2025".into()),
        start_date: None,
        end_date: None,
        total_budget: None,
    }));
    assert_eq!(store.trip(&first).unwrap().name, "Tokyo");
    assert_eq!(store.active_trip().name, "Busan 2025");
}

#[test]
fn test_trip_update_rejects_end_before_start() {
    let mut store = store_with_days(3);
    assert!(!store.apply(TripInfoAction::Update {
        name: None,
        start_date: None,
        end_date: Some(date("2025-03-01")),
        total_budget: None,
    }));
}

#[test]
fn test_duplicate_trip_gets_fresh_ids_and_no_expenses() {
    let mut store = store_with_days(2);
    let act = add_activity(&mut store, 1, "Museum", "10:00", 15.0);
    let day = day_id(&store, 1);
    assert!(store.apply(ExpenseAction::AddToActivity {
        day_id: day.clone(),
        activity_id: act.clone(),
        expense: ActivityExpense::new(15.0, "KRW", "ticket", OwnerId::shared()),
    }));
    let source = store.active_trip_id().to_string();

    let copy = store.duplicate_trip(&source).unwrap();
    assert_ne!(copy, source);
    assert_eq!(store.active_trip_id(), copy);

    let trip = store.active_trip();
    assert_eq!(trip.name, "Tokyo (copy)");
    assert_eq!(trip.days.len(), 2);
    assert_ne!(trip.days[0].id, day);
    assert_ne!(trip.days[0].activities[0].id, act);
    assert_eq!(total_actual_expenses(trip), 0.0);
    assert_eq!(total_estimated_cost(trip), 15.0);
}

#[test]
fn test_import_legacy_single_trip() {
    let mut store = TripStore::default();
    let payload = r#"{
        "version": 3,
        "tripName": "Seoul",
        "startDate": "2025-05-01",
        "endDate": "2025-05-01",
        "totalBudget": "500",
        "days": [
            { "id": 1, "date": "2025-05-01", "items": [
                { "id": "a1", "name": "Palace", "time": "10:00", "type": "attraction", "cost": 50 }
            ] }
        ],
        "expenses": []
    }"#;

    assert!(store.import_trip_data(payload));
    assert_eq!(store.trips().len(), 2);

    let trip = store.active_trip();
    assert_eq!(trip.name, "Seoul");
    assert_eq!(trip.total_budget, 500.0);
    assert_eq!(trip.days[0].day_number, 1);
    assert!(trip.owners.iter().any(|o| o.id.is_shared()));
    assert_eq!(total_estimated_cost(trip), 50.0);
}

#[test]
fn test_import_multi_trip_snapshot_assigns_fresh_ids() {
    let mut source = store_with_days(2);
    source.create_trip(NewTrip {
        name: "Jeju".into(),
        ..NewTrip::default()
    });
    let payload = source.export_snapshot().to_json_pretty().unwrap();

    let mut target = TripStore::default();
    assert!(target.import_trip_data(&payload));
    assert_eq!(target.trips().len(), 3);

    let names: Vec<&str> = target.trips().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["My Trip", "Tokyo", "Jeju"]);
    assert_eq!(target.active_trip().name, "Tokyo");
    for t in source.trips() {
        assert!(target.trip(&t.id).is_none());
    }
}

#[test]
fn test_import_bad_payloads_change_nothing() {
    let mut store = store_with_days(1);
    let before = store.clone();

    for payload in [
        "not json",
        "[1, 2, 3]",
        r#"{ "version": 3, "tripName": "no days" }"#,
        r#"{ "version": 5, "days": [] }"#,
        r#"{ "version": 5, "trips": [] }"#,
        r#"{ "version": 5, "trips": [42] }"#,
    ] {
        assert!(!store.import_trip_data(payload), "accepted: {payload}");
        assert_eq!(store, before);
    }
}

#[test]
fn test_expense_patches_are_validated() {
    use rtripplanner::store::ExpensePatch;

    let mut store = store_with_days(1);
    let day = day_id(&store, 1);
    let act = add_activity(&mut store, 1, "Spa", "15:00", 0.0);
    let e = Expense::new(10.0, "KRW", "towel", OwnerId::shared());
    let eid = e.id.clone();
    assert!(store.apply(ExpenseAction::Add(e)));
    let ae = ActivityExpense::new(80.0, "KRW", "entry", OwnerId::shared());
    let aeid = ae.id.clone();
    assert!(store.apply(ExpenseAction::AddToActivity {
        day_id: day.clone(),
        activity_id: act.clone(),
        expense: ae,
    }));

    assert!(!store.apply(ExpenseAction::Update {
        expense_id: eid.clone(),
        patch: ExpensePatch {
            owner: Some(OwnerId::new("ghost")),
            ..ExpensePatch::default()
        },
    }));
    assert!(store.apply(ExpenseAction::Update {
        expense_id: eid.clone(),
        patch: ExpensePatch {
            amount: Some(12.3456789),
            day_id: Some(Some(day.clone())),
            ..ExpensePatch::default()
        },
    }));
    assert!(store.apply(ExpenseAction::UpdateOnActivity {
        day_id: day.clone(),
        activity_id: act.clone(),
        expense_id: aeid.clone(),
        patch: ExpensePatch {
            description: Some("entry + sauna".into()),
            ..ExpensePatch::default()
        },
    }));

    let trip = store.active_trip();
    assert_eq!(trip.expenses[0].amount, 12.345679);
    assert_eq!(trip.expenses[0].day_id.as_deref(), Some(day.as_str()));
    assert_eq!(trip.days[0].activities[0].expenses[0].description, "entry + sauna");

    assert!(store.apply(ExpenseAction::RemoveFromActivity {
        day_id: day,
        activity_id: act,
        expense_id: aeid,
    }));
    assert!(store.apply(ExpenseAction::Remove { expense_id: eid }));
    assert_eq!(total_actual_expenses(store.active_trip()), 0.0);
}

#[test]
fn test_set_current_day_must_point_at_a_day() {
    let mut store = store_with_days(3);
    assert!(store.apply(TripInfoAction::SetCurrentDay { index: 2 }));
    assert!(!store.apply(TripInfoAction::SetCurrentDay { index: 3 }));
    assert_eq!(store.active_trip().current_day_index, 2);

    // removing the last day pulls the pointer back in range
    let last = day_id(&store, 3);
    assert!(store.apply(DayAction::Remove { day_id: last }));
    assert_eq!(store.active_trip().current_day_index, 1);
}

#[test]
fn test_import_moves_unknown_owner_expenses_to_shared() {
    use rtripplanner::aggregate::fair_shares;

    let mut store = TripStore::default();
    let payload = r#"{
        "tripName": "Busan",
        "owners": [
            { "id": "shared", "name": "Shared" },
            { "id": "alice", "name": "Alice" },
            { "id": "bob", "name": "Bob" }
        ],
        "days": [
            { "id": "d1", "date": "2025-06-01", "items": [
                { "id": "a1", "name": "Market", "expenses": [
                    { "id": "x1", "amount": 30, "owner": "dave" }
                ] }
            ] }
        ],
        "expenses": [
            { "id": "e1", "amount": 100, "owner": "carol" },
            { "id": "e2", "amount": 40, "owner": "alice" }
        ]
    }"#;

    assert!(store.import_trip_data(payload));
    let trip = store.active_trip();

    assert!(trip.expenses[0].owner.is_shared());
    assert_eq!(trip.expenses[1].owner, OwnerId::new("alice"));
    assert!(trip.days[0].activities[0].expenses[0].owner.is_shared());

    // every imported amount is part of the split
    let shares = fair_shares(trip);
    let totals: Vec<f64> = shares.iter().map(|s| s.total).collect();
    assert_eq!(totals, vec![105.0, 65.0]);
    assert_eq!(totals.iter().sum::<f64>(), total_actual_expenses(trip));
}

#[test]
fn test_reorder_days_keeps_current_day() {
    let mut store = store_with_days(4);
    let viewed = day_id(&store, 2);
    assert!(store.apply(TripInfoAction::SetCurrentDay { index: 1 }));

    // the viewed day itself moves
    assert!(store.apply(DayAction::Reorder { from: 1, to: 3 }));
    let trip = store.active_trip();
    assert_eq!(trip.days[trip.current_day_index].id, viewed);

    // another day moves across it
    assert!(store.apply(DayAction::Reorder { from: 0, to: 3 }));
    let trip = store.active_trip();
    assert_eq!(trip.days[trip.current_day_index].id, viewed);

    assert!(store.apply(DayAction::Reorder { from: 3, to: 0 }));
    let trip = store.active_trip();
    assert_eq!(trip.days[trip.current_day_index].id, viewed);
    assert_numbered(&store);
}
