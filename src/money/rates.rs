use super::converter::Converter;
use super::currency::Currency;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Rates are considered stale after this long.
pub const RATE_MAX_AGE_HOURS: i64 = 24;

/// Exchange rates relative to a base currency: `1 base = rates[c] c`.
///
/// The table is supplied from outside (a fetch endpoint or the config
/// file); nothing here recomputes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    pub base: Currency,
    pub rates: BTreeMap<Currency, f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExchangeRates {
    pub fn new(base: Currency) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
            updated_at: None,
        }
    }

    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Rate from the base currency to `currency`.
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }
        self.rates
            .get(&currency)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    pub fn converter(&self, display: Currency) -> AppResult<Converter> {
        let rate = self
            .rate(display)
            .ok_or_else(|| AppError::MissingRate(display.code().to_string()))?;
        Ok(Converter {
            base: self.base,
            display,
            rate,
        })
    }

    /// Staleness belongs to whoever refreshes the table; exposed here so
    /// that owner can ask.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.updated_at {
            Some(at) => now - at > Duration::hours(RATE_MAX_AGE_HOURS),
            None => true,
        }
    }
}

/// Collaborator that produces a rate table (network fetch, user entry…).
pub trait RateSource {
    fn fetch_rates(&self) -> AppResult<ExchangeRates>;
}
