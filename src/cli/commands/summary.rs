use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::core::summary::SummaryLogic;
use crate::errors::{AppError, AppResult};
use crate::money::Currency;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { trip, currency } = cmd {
        let session = Session::open(cfg)?;

        let selected = match trip {
            Some(input) => {
                let id = session.trip_id(input)?;
                session
                    .store
                    .trip(&id)
                    .ok_or(AppError::TripNotFound(id.clone()))?
            }
            None => session.trip(),
        };

        let conv = match currency {
            Some(code) => {
                let display: Currency = code.parse()?;
                cfg.rates().converter(display)?
            }
            None => cfg.converter(),
        };

        SummaryLogic::print(selected, &conv);
    }
    Ok(())
}
