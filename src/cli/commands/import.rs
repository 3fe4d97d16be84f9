use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let payload = fs::read_to_string(&path)?;

        let mut session = Session::open(cfg)?;
        let before = session.store.trips().len();

        // a rejected payload leaves the store untouched
        if !session.store.import_trip_data(&payload) {
            return Err(AppError::Import(format!(
                "{} is not a valid trip snapshot",
                path.display()
            )));
        }

        let imported = session.store.trips().len() - before;
        session.commit(
            "import",
            "trip",
            &format!("Imported {imported} trip(s) from {}", path.display()),
        )?;

        success(format!(
            "Imported {imported} trip(s); active trip is now '{}'",
            session.trip().name
        ));
    }
    Ok(())
}
