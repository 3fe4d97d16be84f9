use chrono::Duration;
use rtripplanner::db::log::{read_log, ttlog};
use rtripplanner::db::migrate::SCHEMA_VERSION;
use rtripplanner::db::pool::DbPool;
use rtripplanner::db::queries::{ACTIVE_TRIP_KEY, load_setting, load_store, load_trips, save_store};
use rtripplanner::models::{Expense, NewTrip, OwnerId, Trip};
use rtripplanner::store::{ExpenseAction, TripStore};

#[test]
fn test_schema_is_migrated_and_logged() {
    let pool = DbPool::in_memory().unwrap();
    let version: u32 = pool
        .conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);

    let entries = read_log(&pool.conn, None).unwrap();
    let migrations = entries
        .iter()
        .filter(|e| e.operation == "migration_applied")
        .count();
    assert_eq!(migrations as u32, SCHEMA_VERSION);
}

#[test]
fn test_empty_database_is_seeded() {
    let mut pool = DbPool::in_memory().unwrap();
    let store = load_store(&mut pool).unwrap();

    assert_eq!(store.trips().len(), 1);
    assert_eq!(load_trips(&mut pool).unwrap().len(), 1);
    assert_eq!(
        load_setting(&mut pool, ACTIVE_TRIP_KEY).unwrap().as_deref(),
        Some(store.active_trip_id())
    );
}

#[test]
fn test_store_round_trip_keeps_order_and_selection() {
    let mut pool = DbPool::in_memory().unwrap();
    let mut store = TripStore::default();
    let first = store.active_trip_id().to_string();
    store.create_trip(NewTrip {
        name: "Second".into(),
        ..NewTrip::default()
    });
    assert!(store.apply(ExpenseAction::Add(Expense::new(
        42.5,
        "KRW",
        "snacks",
        OwnerId::shared()
    ))));
    assert!(store.switch_trip(&first));

    let report = save_store(&mut pool, &store).unwrap();
    assert_eq!(report.written, 2);
    assert!(report.stale.is_empty());

    let loaded = load_store(&mut pool).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.active_trip_id(), first);
    assert_eq!(loaded.trips()[1].expenses[0].amount, 42.5);
}

#[test]
fn test_older_version_does_not_overwrite_newer_row() {
    let mut pool = DbPool::in_memory().unwrap();
    let store = TripStore::default();
    save_store(&mut pool, &store).unwrap();

    let mut older: Trip = store.active_trip().clone();
    older.name = "Outdated".into();
    older.updated_at = older.updated_at - Duration::hours(1);
    let stale_store = TripStore::from_parts(vec![older.clone()], None).unwrap();

    let report = save_store(&mut pool, &stale_store).unwrap();
    assert_eq!(report.written, 0);
    assert_eq!(report.stale, vec![older.id.clone()]);

    let loaded = load_trips(&mut pool).unwrap();
    assert_eq!(loaded[0].name, "My Trip");
}

#[test]
fn test_deleted_trips_are_removed_from_database() {
    let mut pool = DbPool::in_memory().unwrap();
    let mut store = TripStore::default();
    let second = store.create_trip(NewTrip {
        name: "Gone soon".into(),
        ..NewTrip::default()
    });
    save_store(&mut pool, &store).unwrap();

    assert!(store.delete_trip(&second));
    let report = save_store(&mut pool, &store).unwrap();
    assert_eq!(report.deleted, 1);

    let ids: Vec<String> = load_trips(&mut pool).unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![store.active_trip_id().to_string()]);
}

#[test]
fn test_log_limit_returns_most_recent_rows_in_order() {
    let pool = DbPool::in_memory().unwrap();
    for i in 0..5 {
        ttlog(&pool.conn, "test", "", &format!("row {i}")).unwrap();
    }

    let last_two = read_log(&pool.conn, Some(2)).unwrap();
    let messages: Vec<&str> = last_two.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["row 3", "row 4"]);
}

#[test]
fn test_save_keeps_trips_created_by_another_writer() {
    let mut pool = DbPool::in_memory().unwrap();
    let mut mine = load_store(&mut pool).unwrap();

    let mut theirs = load_store(&mut pool).unwrap();
    let added = theirs.create_trip(NewTrip {
        name: "Added elsewhere".into(),
        ..NewTrip::default()
    });
    save_store(&mut pool, &theirs).unwrap();

    assert!(mine.apply(ExpenseAction::Add(Expense::new(
        9.0,
        "KRW",
        "coffee",
        OwnerId::shared()
    ))));
    let report = save_store(&mut pool, &mine).unwrap();
    assert_eq!(report.deleted, 0);

    let ids: Vec<String> = load_trips(&mut pool).unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&added));
}
