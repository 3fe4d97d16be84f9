use crate::cli::parser::{Commands, TransportCmd};
use crate::config::Config;
use crate::core::session::{Session, amount_to_base, input_currency};
use crate::errors::{AppError, AppResult};
use crate::models::TransportLeg;
use crate::store::LogisticsAction;
use crate::ui::messages::{success, warning};
use crate::utils::date::{format_date, parse_optional_date};
use crate::utils::formatting::short_id;
use crate::utils::table::{Column, Table};
use crate::utils::time::{normalize_time, validate_duration};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Transport { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        TransportCmd::List => {
            let conv = cfg.converter();
            let mut table = Table::new(vec![
                Column::left("Id"),
                Column::left("Date"),
                Column::left("Time"),
                Column::left("From"),
                Column::left("To"),
                Column::left("Mode"),
                Column::left("Length"),
                Column::right("Cost"),
            ]);
            for leg in &session.trip().transport_legs {
                table.add_row(vec![
                    short_id(&leg.id).to_string(),
                    format_date(leg.date),
                    leg.departure_time.clone(),
                    leg.from.clone(),
                    leg.to.clone(),
                    leg.mode.clone(),
                    leg.duration.clone(),
                    conv.format(leg.cost),
                ]);
            }
            print!("{}", table.render());
        }

        TransportCmd::Add {
            from,
            to,
            date,
            mode,
            time,
            duration,
            cost,
            currency,
        } => {
            let cost = match cost {
                Some(c) => {
                    let currency = input_currency(cfg, currency.as_deref())?;
                    amount_to_base(cfg, *c, currency)?
                }
                None => 0.0,
            };
            let leg = TransportLeg {
                id: String::new(),
                from: from.clone(),
                to: to.clone(),
                date: parse_optional_date(date.as_ref())?,
                mode: mode.clone(),
                departure_time: time.as_deref().map(normalize_time).transpose()?.unwrap_or_default(),
                duration: duration.as_deref().map(validate_duration).transpose()?.unwrap_or_default(),
                cost,
            };
            session.apply(
                LogisticsAction::AddTransport(leg),
                "add",
                &format!("Transport {from} → {to}"),
            )?;
            success(format!("Transport {from} → {to} added."));
        }

        TransportCmd::Remove { id } => {
            let mut hits = session
                .trip()
                .transport_legs
                .iter()
                .filter(|l| !id.is_empty() && l.id.starts_with(id.as_str()));
            let leg_id = match (hits.next(), hits.next()) {
                (Some(l), None) => l.id.clone(),
                _ => return Err(AppError::Other(format!("no single transport leg matches '{id}'"))),
            };
            if session.apply(
                LogisticsAction::RemoveTransport { leg_id },
                "del",
                &format!("Transport {id} removed"),
            )? {
                success("Transport removed.");
            } else {
                warning("Nothing removed.");
            }
        }
    }

    Ok(())
}
