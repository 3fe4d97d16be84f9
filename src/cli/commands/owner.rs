use crate::aggregate::{OwnerFilter, total_expenses_by_owner};
use crate::cli::parser::{Commands, OwnerCmd};
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::{OwnerConfig, OwnerId};
use crate::store::OwnerAction;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::short_id;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Owner { action } = cmd else {
        return Ok(());
    };

    let mut session = Session::open(cfg)?;

    match action {
        OwnerCmd::List => {
            let conv = cfg.converter();
            let trip = session.trip();
            let mut table = Table::new(vec![
                Column::left("Id"),
                Column::left("Name"),
                Column::left("Color"),
                Column::right("Spent"),
            ]);
            for o in &trip.owners {
                table.add_row(vec![
                    short_id(o.id.as_str()).to_string(),
                    o.label().to_string(),
                    o.color.clone(),
                    conv.format(total_expenses_by_owner(trip, &OwnerFilter::Owner(o.id.clone()))),
                ]);
            }
            print!("{}", table.render());
        }

        OwnerCmd::Add { name, color } => {
            if name.trim().is_empty()
                || session
                    .trip()
                    .owners
                    .iter()
                    .any(|o| o.name.eq_ignore_ascii_case(name.trim()))
            {
                warning(format!("Owner '{name}' already exists or is empty."));
                return Ok(());
            }
            let owner = OwnerConfig {
                id: OwnerId::new(crate::models::new_id()),
                name: name.trim().to_string(),
                color: color.clone(),
            };
            if session.apply(OwnerAction::Add(owner), "add", &format!("Owner '{name}' added"))? {
                success(format!("Owner '{name}' added."));
            } else {
                warning(format!("Owner '{name}' was not added."));
            }
        }

        OwnerCmd::Update { owner, name, color } => {
            let owner_id = session.owner(Some(owner))?;
            let action = OwnerAction::Update {
                owner_id,
                name: name.clone(),
                color: color.clone(),
            };
            if session.apply(action, "edit", &format!("Owner '{owner}' updated"))? {
                success("Owner updated.");
            } else {
                warning("Nothing to update.");
            }
        }

        OwnerCmd::Remove { owner } => {
            let owner_id = session.owner(Some(owner))?;
            if owner_id.is_shared() {
                warning("The shared owner cannot be removed.");
                return Ok(());
            }
            if session.apply(
                OwnerAction::Remove { owner_id },
                "del",
                &format!("Owner '{owner}' removed, expenses moved to shared"),
            )? {
                success(format!("Owner '{owner}' removed; their expenses are now shared."));
            }
        }
    }

    Ok(())
}
