use crate::cli::parser::{Commands, TripCmd};
use crate::config::Config;
use crate::core::session::{Session, amount_to_base, input_currency};
use crate::errors::{AppError, AppResult};
use crate::models::NewTrip;
use crate::store::TripInfoAction;
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{GREY, RESET, colorize_optional, status_marker};
use crate::utils::date::{format_date, parse_optional_date};
use crate::utils::formatting::{bold, short_id};
use crate::utils::table::{Column, Table};
use crate::utils::time::end_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Trip { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        TripCmd::List => list(&session, cfg)?,

        TripCmd::Show => {
            show(&session, cfg);
        }

        TripCmd::Create {
            name,
            start,
            end,
            budget,
            currency,
            generate_days,
        } => {
            let start_date = parse_optional_date(start.as_ref())?;
            let end_date = parse_optional_date(end.as_ref())?;
            if let (Some(s), Some(e)) = (start_date, end_date)
                && e < s
            {
                return Err(AppError::InvalidDate(format!("end {e} is before start {s}")));
            }
            let currency = input_currency(cfg, currency.as_deref())?;
            let total_budget = match budget {
                Some(b) => amount_to_base(cfg, *b, currency)?,
                None => 0.0,
            };

            let id = session.store.create_trip(NewTrip {
                name: name.clone(),
                start_date,
                end_date,
                total_budget,
                generate_days: *generate_days,
            });
            session.commit("create", "trip", &format!("Created trip '{name}' ({id})"))?;
            success(format!(
                "Trip '{}' created with {} day(s) and is now active [{}]",
                name,
                session.trip().days.len(),
                short_id(&id)
            ));
        }

        TripCmd::Switch { trip } => {
            let id = session.trip_id(trip)?;
            if session.store.switch_trip(&id) {
                session.commit("switch", "trip", &format!("Active trip set to {id}"))?;
                success(format!("Active trip: {}", session.trip().name));
            }
        }

        TripCmd::Duplicate { trip } => {
            let id = session.trip_id(trip)?;
            if let Some(copy) = session.store.duplicate_trip(&id) {
                session.commit("duplicate", "trip", &format!("Duplicated {id} into {copy}"))?;
                success(format!(
                    "Created '{}' [{}] and made it active",
                    session.trip().name,
                    short_id(&copy)
                ));
            }
        }

        TripCmd::Delete { trip } => {
            let id = session.trip_id(trip)?;
            if session.store.delete_trip(&id) {
                session.commit("del", "trip", &format!("Deleted trip {id}"))?;
                success(format!(
                    "Trip deleted. Active trip: {}",
                    session.trip().name
                ));
            } else {
                warning("The last remaining trip cannot be deleted.");
            }
        }

        TripCmd::Update {
            name,
            start,
            end,
            budget,
            currency,
        } => {
            let currency = input_currency(cfg, currency.as_deref())?;
            let total_budget = budget
                .map(|b| amount_to_base(cfg, b, currency))
                .transpose()?;
            let action = TripInfoAction::Update {
                name: name.clone(),
                start_date: parse_optional_date(start.as_ref())?,
                end_date: parse_optional_date(end.as_ref())?,
                total_budget,
            };
            if session.apply(action, "edit", "Trip header updated")? {
                success("Trip updated.");
            } else {
                warning("Nothing changed (check that the end date is not before the start date).");
            }
        }
    }

    Ok(())
}

fn list(session: &Session, cfg: &Config) -> AppResult<()> {
    let conv = cfg.converter();
    let mut table = Table::new(vec![
        Column::left(" "),
        Column::left("Id"),
        Column::left("Name"),
        Column::left("From"),
        Column::left("To"),
        Column::right("Days"),
        Column::right("Budget"),
    ]);

    for trip in session.store.trips() {
        let active = trip.id == session.store.active_trip_id();
        table.add_row(vec![
            if active { "*".into() } else { String::new() },
            short_id(&trip.id).to_string(),
            trip.name.clone(),
            format_date(trip.start_date),
            format_date(trip.end_date),
            trip.days.len().to_string(),
            conv.format(trip.total_budget),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

fn show(session: &Session, cfg: &Config) {
    let conv = cfg.converter();
    let trip = session.trip();
    header(&trip.name);

    if trip.days.is_empty() {
        println!("{GREY}No days planned yet.{RESET}");
        return;
    }

    for day in &trip.days {
        let dest = if day.destination.is_empty() {
            String::new()
        } else {
            format!(" · {}", day.destination)
        };
        println!(
            "{}",
            bold(&format!("Day {} · {}{}", day.day_number, format_date(day.date), dest))
        );
        for (i, a) in day.activities.iter().enumerate() {
            let time = if a.time.is_empty() { "--:--" } else { a.time.as_str() };
            let until = end_time(&a.time, &a.duration);
            println!(
                "  {} {:>2}. {} {} {} {}{}",
                status_marker(a.completed, a.skipped),
                i + 1,
                colorize_optional(time),
                a.category.icon(),
                a.name,
                if until.is_empty() { String::new() } else { format!("(until {until}) ") },
                conv.format(a.estimated_cost)
            );
        }
        if !day.notes.is_empty() {
            println!("  📝 {}", day.notes);
        }
    }
}
