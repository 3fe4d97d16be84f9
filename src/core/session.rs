//! One CLI invocation's view of the planner: open the database, load the
//! store, apply a mutation, persist, audit.

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_store, save_store};
use crate::errors::{AppError, AppResult};
use crate::models::{OwnerId, Trip};
use crate::money::{Currency, round_to_persisted, to_base};
use crate::store::{TripAction, TripStore};
use crate::ui::messages::warning;
use tracing::{debug, warn};

pub struct Session {
    pub pool: DbPool,
    pub store: TripStore,
}

impl Session {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let mut pool = DbPool::open(&cfg.database)?;
        let store = load_store(&mut pool)?;
        Ok(Self { pool, store })
    }

    pub fn trip(&self) -> &Trip {
        self.store.active_trip()
    }

    /// Persist the store and append an audit row. A failing audit write
    /// is reported but does not undo the save.
    pub fn commit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let report = save_store(&mut self.pool, &self.store)?;
        if !report.stale.is_empty() {
            warning(format!(
                "{} trip(s) were changed elsewhere in the meantime; the newer stored version was kept.",
                report.stale.len()
            ));
        }
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warn!(error = %e, "failed to write internal log");
        }
        Ok(())
    }

    /// Apply an action to the active trip and persist it. Returns `false`
    /// (and persists nothing) when the store refused the action.
    pub fn apply(
        &mut self,
        action: impl Into<TripAction>,
        operation: &str,
        message: &str,
    ) -> AppResult<bool> {
        let action = action.into();
        let target = action.label();
        if !self.store.apply(action) {
            debug!(operation, target, "nothing to persist");
            return Ok(false);
        }
        let trip_name = self.trip().name.clone();
        self.commit(operation, target, &format!("{message} [{trip_name}]"))?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // CLI addressing: 1-based day numbers and activity positions
    // ------------------------------------------------------------------

    pub fn trip_id(&self, input: &str) -> AppResult<String> {
        self.store
            .resolve_trip_id(input)
            .ok_or_else(|| AppError::TripNotFound(input.to_string()))
    }

    pub fn day_id(&self, day_number: u32) -> AppResult<String> {
        self.trip()
            .day_by_number(day_number)
            .map(|d| d.id.clone())
            .ok_or_else(|| AppError::DayNotFound(format!("day {day_number}")))
    }

    /// (day id, activity id) for `day_number` / 1-based `position`.
    pub fn activity_id(&self, day_number: u32, position: usize) -> AppResult<(String, String)> {
        let day = self
            .trip()
            .day_by_number(day_number)
            .ok_or_else(|| AppError::DayNotFound(format!("day {day_number}")))?;
        let activity = position
            .checked_sub(1)
            .and_then(|i| day.activities.get(i))
            .ok_or_else(|| {
                AppError::ActivityNotFound(format!("#{position} on day {day_number}"))
            })?;
        Ok((day.id.clone(), activity.id.clone()))
    }

    pub fn owner(&self, input: Option<&str>) -> AppResult<OwnerId> {
        match input {
            None => Ok(OwnerId::shared()),
            Some(s) => OwnerId::resolve(&self.trip().owners, s)
                .ok_or_else(|| AppError::OwnerNotFound(s.to_string())),
        }
    }
}

/// Convert a user-entered amount (in `currency`) into the base currency.
pub fn amount_to_base(cfg: &Config, amount: f64, currency: Currency) -> AppResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::InvalidAmount(amount.to_string()));
    }
    let rate = cfg
        .rates()
        .rate(currency)
        .ok_or_else(|| AppError::MissingRate(currency.code().to_string()))?;
    Ok(round_to_persisted(to_base(amount, rate)))
}

/// `--currency` flag, defaulting to the configured display currency.
pub fn input_currency(cfg: &Config, flag: Option<&str>) -> AppResult<Currency> {
    flag.map(str::parse).unwrap_or(Ok(cfg.display_currency))
}
