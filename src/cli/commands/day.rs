use crate::cli::parser::{Commands, DayCmd};
use crate::aggregate::{day_actual_cost, day_estimated_cost};
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::store::{DayAction, DayPatch, TripInfoAction};
use crate::ui::messages::{success, warning};
use crate::utils::date::{format_date, parse_optional_date};
use crate::utils::table::{Column, Table};

/// 1-based CLI position → 0-based index.
fn zero_based(n: u32) -> AppResult<usize> {
    (n as usize)
        .checked_sub(1)
        .ok_or_else(|| AppError::DayNotFound("day numbers start at 1".into()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Day { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        DayCmd::List => {
            let conv = cfg.converter();
            let trip = session.trip();
            let mut table = Table::new(vec![
                Column::left(" "),
                Column::right("Day"),
                Column::left("Date"),
                Column::left("Destination"),
                Column::right("Items"),
                Column::right("Estimated"),
                Column::right("Actual"),
            ]);
            for (i, day) in trip.days.iter().enumerate() {
                table.add_row(vec![
                    if i == trip.current_day_index { "▶".into() } else { String::new() },
                    day.day_number.to_string(),
                    format_date(day.date),
                    day.destination.clone(),
                    day.activities.len().to_string(),
                    conv.format(day_estimated_cost(trip, &day.id)),
                    conv.format(day_actual_cost(trip, &day.id)),
                ]);
            }
            print!("{}", table.render());
        }

        DayCmd::Add {
            date,
            destination,
            at,
        } => {
            let index = at.map(|n| zero_based(n as u32)).transpose()?;
            let action = DayAction::Add {
                date: parse_optional_date(date.as_ref())?,
                destination: destination.clone(),
                index,
            };
            session.apply(action, "add", "Day added")?;
            success(format!("Trip now has {} day(s).", session.trip().days.len()));
        }

        DayCmd::Remove { day } => {
            let day_id = session.day_id(*day)?;
            if session.apply(DayAction::Remove { day_id }, "del", &format!("Day {day} removed"))? {
                success(format!("Day {day} removed; days renumbered."));
            }
        }

        DayCmd::Move { from, to } => {
            let action = DayAction::Reorder {
                from: zero_based(*from)?,
                to: zero_based(*to)?,
            };
            if session.apply(action, "move", &format!("Day {from} moved to {to}"))? {
                success(format!("Day {from} is now day {to}."));
            } else {
                warning("Nothing moved (check the day numbers).");
            }
        }

        DayCmd::Current { day } => {
            let action = TripInfoAction::SetCurrentDay {
                index: zero_based(*day)?,
            };
            if session.apply(action, "edit", &format!("Current day set to {day}"))? {
                success(format!("Day {day} is now the current day."));
            } else {
                warning(format!("Day {day} is already current or does not exist."));
            }
        }

        DayCmd::Update {
            day,
            date,
            destination,
            notes,
        } => {
            let day_id = session.day_id(*day)?;
            let patch = DayPatch {
                date: parse_optional_date(date.as_ref())?,
                destination: destination.clone(),
                notes: notes.clone(),
            };
            if session.apply(
                DayAction::Update { day_id, patch },
                "edit",
                &format!("Day {day} updated"),
            )? {
                success(format!("Day {day} updated."));
            } else {
                warning("Nothing to update.");
            }
        }
    }

    Ok(())
}
