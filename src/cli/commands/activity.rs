use crate::cli::parser::{ActivityCmd, Commands};
use crate::config::Config;
use crate::core::session::{Session, amount_to_base, input_currency};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityCategory, ScheduledActivity};
use crate::store::{ActivityAction, ActivityPatch};
use crate::ui::messages::{success, warning};
use crate::utils::colors::{colorize_optional, status_marker};
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::{duration_minutes, normalize_time, validate_duration};

fn parse_category(code: Option<&str>) -> AppResult<Option<ActivityCategory>> {
    code.map(|c| {
        ActivityCategory::from_code(c).ok_or_else(|| {
            let known: Vec<&str> = ActivityCategory::ALL.iter().map(|k| k.code()).collect();
            AppError::InvalidCategory(format!("'{c}' (expected one of: {})", known.join(", ")))
        })
    })
    .transpose()
}

fn zero_based(position: usize) -> AppResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| AppError::ActivityNotFound("positions start at 1".into()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Activity { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        ActivityCmd::List { day } => {
            let conv = cfg.converter();
            let trip = session.trip();
            let plan = trip
                .day_by_number(*day)
                .ok_or_else(|| AppError::DayNotFound(format!("day {day}")))?;
            let mut table = Table::new(vec![
                Column::right("#"),
                Column::left("Time"),
                Column::left("Length"),
                Column::left("Category"),
                Column::left("Name"),
                Column::right("Estimated"),
                Column::right("Spent"),
            ]);
            for (i, a) in plan.activities.iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    if a.time.is_empty() { "--:--".into() } else { a.time.clone() },
                    duration_minutes(&a.duration).map(mins2readable).unwrap_or_default(),
                    a.category.code().to_string(),
                    a.name.clone(),
                    conv.format(a.estimated_cost),
                    conv.format(a.expense_total()),
                ]);
            }
            print!("{}", table.render());

            // flags and memos don't fit the table
            for (i, a) in plan.activities.iter().enumerate() {
                if a.completed || a.skipped || !a.memos.is_empty() {
                    println!(
                        "{} {:>2}. {}",
                        status_marker(a.completed, a.skipped),
                        i + 1,
                        colorize_optional(&a.memos.join(" | "))
                    );
                }
            }
        }

        ActivityCmd::Add {
            day,
            name,
            time,
            duration,
            category,
            cost,
            currency,
            at,
        } => {
            let day_id = session.day_id(*day)?;
            let mut activity = ScheduledActivity::new(
                name.clone(),
                parse_category(category.as_deref())?.unwrap_or_default(),
            );
            if let Some(t) = time {
                activity.time = normalize_time(t)?;
            }
            if let Some(d) = duration {
                activity.duration = validate_duration(d)?;
            }
            if let Some(c) = cost {
                let currency = input_currency(cfg, currency.as_deref())?;
                activity.estimated_cost = amount_to_base(cfg, *c, currency)?;
            }
            let index = at.map(zero_based).transpose()?;

            session.apply(
                ActivityAction::Add {
                    day_id,
                    activity,
                    index,
                },
                "add",
                &format!("Activity '{name}' added to day {day}"),
            )?;
            success(format!("Activity '{name}' added to day {day}."));
        }

        ActivityCmd::Update {
            day,
            index,
            name,
            time,
            duration,
            category,
            cost,
            currency,
        } => {
            let (day_id, activity_id) = session.activity_id(*day, *index)?;
            let estimated_cost = match cost {
                Some(c) => {
                    let currency = input_currency(cfg, currency.as_deref())?;
                    Some(amount_to_base(cfg, *c, currency)?)
                }
                None => None,
            };
            let patch = ActivityPatch {
                name: name.clone(),
                time: time.as_deref().map(normalize_time).transpose()?,
                duration: duration.as_deref().map(validate_duration).transpose()?,
                category: parse_category(category.as_deref())?,
                estimated_cost,
                ..ActivityPatch::default()
            };
            if session.apply(
                ActivityAction::Update {
                    day_id,
                    activity_id,
                    patch,
                },
                "edit",
                &format!("Activity {index} of day {day} updated"),
            )? {
                success("Activity updated.");
            } else {
                warning("Nothing to update.");
            }
        }

        ActivityCmd::Remove { day, index } => {
            let (day_id, activity_id) = session.activity_id(*day, *index)?;
            if session.apply(
                ActivityAction::Remove {
                    day_id,
                    activity_id,
                },
                "del",
                &format!("Activity {index} of day {day} removed"),
            )? {
                success("Activity removed.");
            }
        }

        ActivityCmd::Move { day, from, to } => {
            let day_id = session.day_id(*day)?;
            let action = ActivityAction::Reorder {
                day_id,
                from: zero_based(*from)?,
                to: zero_based(*to)?,
            };
            if session.apply(action, "move", &format!("Day {day}: activity {from} → {to}"))? {
                success(format!("Activity {from} moved to position {to}; start times kept their slots."));
            } else {
                warning("Nothing moved (check the positions).");
            }
        }

        ActivityCmd::MoveDay {
            day,
            index,
            to_day,
            at,
        } => {
            let (from_day_id, activity_id) = session.activity_id(*day, *index)?;
            let to_day_id = session.day_id(*to_day)?;
            let action = ActivityAction::MoveToDay {
                from_day_id,
                activity_id,
                to_day_id,
                index: at.map(zero_based).transpose()?,
            };
            if session.apply(action, "move", &format!("Activity moved from day {day} to day {to_day}"))? {
                success(format!("Activity moved to day {to_day}."));
            } else {
                warning("Nothing moved.");
            }
        }

        ActivityCmd::Done { day, index } | ActivityCmd::Skip { day, index } => {
            let (day_id, activity_id) = session.activity_id(*day, *index)?;
            let action = if matches!(action, ActivityCmd::Done { .. }) {
                ActivityAction::ToggleCompleted {
                    day_id,
                    activity_id,
                }
            } else {
                ActivityAction::ToggleSkipped {
                    day_id,
                    activity_id,
                }
            };
            session.apply(action, "toggle", &format!("Activity {index} of day {day} toggled"))?;
            success("Activity status updated.");
        }

        ActivityCmd::Memo { day, index, text } => {
            let (day_id, activity_id) = session.activity_id(*day, *index)?;
            if session.apply(
                ActivityAction::AddMemo {
                    day_id,
                    activity_id,
                    memo: text.clone(),
                },
                "add",
                "Memo added",
            )? {
                success("Memo added.");
            } else {
                warning("Empty memo ignored.");
            }
        }
    }

    Ok(())
}
