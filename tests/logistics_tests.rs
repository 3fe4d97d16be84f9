use chrono::{NaiveDate, Utc};
use rtripplanner::models::{
    Accommodation, ActivityCategory, Destination, Flight, ImmigrationDirection,
    ImmigrationSchedule, MediaAttachment, MediaKind, NewTrip, PendingExpense, RestaurantComment,
    ScheduledActivity, TransportLeg, Trip,
};
use rtripplanner::store::{
    ActivityAction, DayAction, ExpenseAction, LogisticsAction, TransportPatch, TripStore,
};

fn one_day_store() -> (TripStore, String) {
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let store = TripStore::new(Trip::new(NewTrip {
        name: "Taipei".into(),
        start_date: Some(start),
        end_date: Some(start),
        total_budget: 0.0,
        generate_days: true,
    }));
    let day_id = store.active_trip().days[0].id.clone();
    (store, day_id)
}

fn leg(from: &str, to: &str, cost: f64) -> TransportLeg {
    TransportLeg {
        id: String::new(),
        from: from.into(),
        to: to.into(),
        date: None,
        mode: "train".into(),
        departure_time: "08:10".into(),
        duration: "1h30m".into(),
        cost,
    }
}

#[test]
fn test_transport_legs_add_update_remove() {
    let (mut store, _) = one_day_store();

    assert!(store.apply(LogisticsAction::AddTransport(leg("Taipei", "Hualien", 440.1234567))));
    let added = store.active_trip().transport_legs[0].clone();
    assert!(!added.id.is_empty());
    assert_eq!(added.cost, 440.123457);

    assert!(store.apply(LogisticsAction::UpdateTransport {
        leg_id: added.id.clone(),
        patch: TransportPatch {
            mode: Some("bus".into()),
            ..TransportPatch::default()
        },
    }));
    assert_eq!(store.active_trip().transport_legs[0].mode, "bus");

    assert!(!store.apply(LogisticsAction::AddTransport(leg("A", "B", f64::INFINITY))));
    assert!(!store.apply(LogisticsAction::RemoveTransport {
        leg_id: "unknown".into()
    }));
    assert!(store.apply(LogisticsAction::RemoveTransport { leg_id: added.id }));
    assert!(store.active_trip().transport_legs.is_empty());
}

#[test]
fn test_destinations_immigration_and_restaurant_comments() {
    let (mut store, _) = one_day_store();

    assert!(!store.apply(LogisticsAction::AddDestination(Destination {
        id: String::new(),
        name: "  ".into(),
        country: "TW".into(),
    })));
    assert!(store.apply(LogisticsAction::AddDestination(Destination {
        id: String::new(),
        name: "Tainan".into(),
        country: "TW".into(),
    })));

    assert!(store.apply(LogisticsAction::AddImmigration(ImmigrationSchedule {
        id: String::new(),
        direction: ImmigrationDirection::Arrival,
        date: NaiveDate::from_ymd_opt(2025, 9, 1),
        time: "14:20".into(),
        airport: "TPE".into(),
        flight_number: "BR169".into(),
    })));

    assert!(store.apply(LogisticsAction::AddRestaurantComment(RestaurantComment {
        id: String::new(),
        restaurant: "Din Tai Fung".into(),
        comment: "long queue".into(),
        rating: Some(4),
        created_at: Utc::now(),
    })));

    let trip = store.active_trip().clone();
    assert_eq!(trip.destinations.len(), 1);
    assert_eq!(trip.immigration_schedules[0].direction, ImmigrationDirection::Arrival);
    assert_eq!(trip.restaurant_comments[0].rating, Some(4));

    assert!(store.apply(LogisticsAction::RemoveDestination {
        destination_id: trip.destinations[0].id.clone()
    }));
    assert!(store.apply(LogisticsAction::RemoveImmigration {
        schedule_id: trip.immigration_schedules[0].id.clone()
    }));
    assert!(store.apply(LogisticsAction::RemoveRestaurantComment {
        comment_id: trip.restaurant_comments[0].id.clone()
    }));

    let trip = store.active_trip();
    assert!(trip.destinations.is_empty());
    assert!(trip.immigration_schedules.is_empty());
    assert!(trip.restaurant_comments.is_empty());
}

#[test]
fn test_day_flights_and_accommodation() {
    let (mut store, day_id) = one_day_store();

    assert!(store.apply(DayAction::AddFlight {
        day_id: day_id.clone(),
        flight: Flight {
            id: String::new(),
            flight_number: "CI101".into(),
            departure_airport: "NRT".into(),
            arrival_airport: "TPE".into(),
            departure_time: "09:00".into(),
            arrival_time: "11:40".into(),
        },
    }));
    let flight_id = store.active_trip().days[0].flights[0].id.clone();
    assert!(!flight_id.is_empty());

    let stay = Some(Accommodation {
        name: "Hotel Eclat".into(),
        address: "Dunhua S Rd".into(),
        check_in: "15:00".into(),
        check_out: "11:00".into(),
    });
    assert!(store.apply(DayAction::SetAccommodation {
        day_id: day_id.clone(),
        accommodation: stay.clone(),
    }));
    // same value again changes nothing
    assert!(!store.apply(DayAction::SetAccommodation {
        day_id: day_id.clone(),
        accommodation: stay,
    }));

    assert!(store.apply(DayAction::RemoveFlight {
        day_id: day_id.clone(),
        flight_id,
    }));
    assert!(store.apply(DayAction::SetAccommodation {
        day_id,
        accommodation: None,
    }));

    let day = &store.active_trip().days[0];
    assert!(day.flights.is_empty());
    assert!(day.accommodation.is_none());
}

#[test]
fn test_activity_memos_and_media() {
    let (mut store, day_id) = one_day_store();
    let act = ScheduledActivity::new("Night market", ActivityCategory::Meal);
    let act_id = act.id.clone();
    assert!(store.apply(ActivityAction::Add {
        day_id: day_id.clone(),
        activity: act,
        index: None,
    }));

    assert!(!store.apply(ActivityAction::AddMemo {
        day_id: day_id.clone(),
        activity_id: act_id.clone(),
        memo: "   ".into(),
    }));
    assert!(store.apply(ActivityAction::AddMemo {
        day_id: day_id.clone(),
        activity_id: act_id.clone(),
        memo: " try the pepper buns ".into(),
    }));
    assert!(store.apply(ActivityAction::AddMedia {
        day_id: day_id.clone(),
        activity_id: act_id.clone(),
        media: MediaAttachment {
            id: String::new(),
            kind: MediaKind::Photo,
            uri: "file:///tmp/market.jpg".into(),
            created_at: Utc::now(),
        },
    }));

    let activity = store.active_trip().days[0].activities[0].clone();
    assert_eq!(activity.memos, vec!["try the pepper buns".to_string()]);
    assert_eq!(activity.media.len(), 1);

    assert!(!store.apply(ActivityAction::RemoveMemo {
        day_id: day_id.clone(),
        activity_id: act_id.clone(),
        index: 3,
    }));
    assert!(store.apply(ActivityAction::RemoveMemo {
        day_id: day_id.clone(),
        activity_id: act_id.clone(),
        index: 0,
    }));
    assert!(store.apply(ActivityAction::RemoveMedia {
        day_id,
        activity_id: act_id,
        media_id: activity.media[0].id.clone(),
    }));

    let activity = &store.active_trip().days[0].activities[0];
    assert!(activity.memos.is_empty());
    assert!(activity.media.is_empty());
}

#[test]
fn test_pending_camera_expense_set_and_clear() {
    let (mut store, _) = one_day_store();
    let pending = PendingExpense {
        amount: 120.0,
        currency: "TWD".into(),
        description: "Bubble tea".into(),
        image_uri: None,
    };

    assert!(store.apply(ExpenseAction::SetPending(Some(pending.clone()))));
    assert!(!store.apply(ExpenseAction::SetPending(Some(pending))));
    assert!(store.apply(ExpenseAction::SetPending(None)));
    assert!(store.active_trip().pending_camera_expense.is_none());
}
