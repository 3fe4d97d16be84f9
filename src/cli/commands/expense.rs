use crate::cli::parser::{Commands, ExpenseCmd};
use crate::config::Config;
use crate::core::session::{Session, amount_to_base, input_currency};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityExpense, Expense, ExpenseCategory, PendingExpense, Trip};
use crate::ocr::{PlainTextRecognizer, scan_receipt};
use crate::store::ExpenseAction;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::short_id;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Expense { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        ExpenseCmd::List => list(session.trip(), cfg),

        ExpenseCmd::Add {
            amount,
            description,
            currency,
            owner,
            day,
            activity,
            category,
        } => {
            let currency = input_currency(cfg, currency.as_deref())?;
            let base_amount = amount_to_base(cfg, *amount, currency)?;
            if base_amount <= 0.0 {
                return Err(AppError::InvalidAmount(amount.to_string()));
            }
            let owner = session.owner(owner.as_deref())?;

            let action = match (day, activity) {
                (Some(d), Some(i)) => {
                    let (day_id, activity_id) = session.activity_id(*d, *i)?;
                    ExpenseAction::AddToActivity {
                        day_id,
                        activity_id,
                        expense: ActivityExpense::new(
                            base_amount,
                            currency.code(),
                            description,
                            owner,
                        ),
                    }
                }
                _ => {
                    let mut expense =
                        Expense::new(base_amount, currency.code(), description, owner);
                    if let Some(d) = day {
                        expense = expense.on_day(session.day_id(*d)?);
                    }
                    if let Some(c) = category {
                        let c = ExpenseCategory::from_code(c)
                            .ok_or_else(|| AppError::InvalidCategory(c.clone()))?;
                        expense = expense.with_category(c);
                    }
                    ExpenseAction::Add(expense)
                }
            };

            let shown = cfg.converter().format(base_amount);
            if session.apply(action, "add", &format!("Expense {shown} '{description}'"))? {
                success(format!("Expense recorded: {shown}"));
            } else {
                warning("Expense refused (unknown owner or day).");
            }
        }

        ExpenseCmd::Remove { id } => {
            let action = find_expense(session.trip(), id)?;
            if session.apply(action, "del", &format!("Expense {id} removed"))? {
                success("Expense removed.");
            }
        }

        ExpenseCmd::Scan {
            file,
            save,
            owner,
            day,
            description,
        } => {
            let path = expand_tilde(file);
            let bytes = fs::read(&path)?;

            let Some(found) = scan_receipt(&PlainTextRecognizer, &bytes, cfg.ocr_default_currency)?
            else {
                warning("No amount found on the receipt; enter it manually with `expense add`.");
                return Ok(());
            };

            info(format!("Detected {} {}", found.amount, found.currency));

            if !*save {
                let pending = PendingExpense {
                    amount: found.amount,
                    currency: found.currency.code().to_string(),
                    description: description.clone(),
                    image_uri: Some(path.display().to_string()),
                };
                session.apply(ExpenseAction::SetPending(Some(pending)), "edit", "Receipt scanned")?;
                info("Kept as pending; re-run with --save to record it.");
                return Ok(());
            }

            let base_amount = amount_to_base(cfg, found.amount, found.currency)?;
            let owner = session.owner(owner.as_deref())?;
            let mut expense = Expense::new(base_amount, found.currency.code(), description, owner);
            if let Some(d) = day {
                expense = expense.on_day(session.day_id(*d)?);
            }

            if session.apply(
                ExpenseAction::Add(expense),
                "add",
                &format!("Receipt {} {}", found.amount, found.currency),
            )? {
                session.apply(ExpenseAction::SetPending(None), "edit", "Pending receipt cleared")?;
                success(format!(
                    "Expense recorded: {}",
                    cfg.converter().format(base_amount)
                ));
            }
        }
    }

    Ok(())
}

/// Locate an expense by id or id prefix, trip-level first.
fn find_expense(trip: &Trip, input: &str) -> AppResult<ExpenseAction> {
    let mut hits: Vec<ExpenseAction> = trip
        .expenses
        .iter()
        .filter(|e| e.id.starts_with(input))
        .map(|e| ExpenseAction::Remove {
            expense_id: e.id.clone(),
        })
        .collect();

    for day in &trip.days {
        for a in &day.activities {
            for e in a.expenses.iter().filter(|e| e.id.starts_with(input)) {
                hits.push(ExpenseAction::RemoveFromActivity {
                    day_id: day.id.clone(),
                    activity_id: a.id.clone(),
                    expense_id: e.id.clone(),
                });
            }
        }
    }

    match hits.len() {
        1 if !input.is_empty() => Ok(hits.remove(0)),
        0 => Err(AppError::ExpenseNotFound(input.to_string())),
        _ => Err(AppError::ExpenseNotFound(format!("'{input}' is ambiguous"))),
    }
}

fn list(trip: &Trip, cfg: &Config) {
    let conv = cfg.converter();
    let owner = |id: &crate::models::OwnerId| {
        trip.owner(id)
            .map(|o| o.label().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let mut table = Table::new(vec![
        Column::left("Id"),
        Column::left("Where"),
        Column::left("Category"),
        Column::left("Description"),
        Column::right("Amount"),
        Column::left("Entered"),
        Column::left("Owner"),
    ]);

    for e in &trip.expenses {
        let place = e
            .day_id
            .as_deref()
            .and_then(|id| trip.day(id))
            .map(|d| format!("day {}", d.day_number))
            .unwrap_or_else(|| "trip".into());
        table.add_row(vec![
            short_id(&e.id).to_string(),
            place,
            e.category.unwrap_or_default().code().to_string(),
            e.description.clone(),
            conv.format(e.amount),
            e.currency.clone(),
            owner(&e.owner),
        ]);
    }
    for day in &trip.days {
        for a in &day.activities {
            for e in &a.expenses {
                table.add_row(vec![
                    short_id(&e.id).to_string(),
                    format!("day {} · {}", day.day_number, a.name),
                    "activity".into(),
                    e.description.clone(),
                    conv.format(e.amount),
                    e.currency.clone(),
                    owner(&e.owner),
                ]);
            }
        }
    }

    print!("{}", table.render());

    if let Some(p) = &trip.pending_camera_expense {
        println!();
        info(format!(
            "Pending receipt: {} {} ({})",
            p.amount,
            p.currency,
            p.image_uri.as_deref().unwrap_or("--")
        ));
    }
}
