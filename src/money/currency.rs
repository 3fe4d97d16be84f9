use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the planner can display, store and recognise on receipts.
///
/// `minor_units()` is how many decimals an everyday amount carries: KRW and
/// JPY are handled as whole units, the others in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Krw,
    Jpy,
    Cny,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Krw,
        Currency::Jpy,
        Currency::Cny,
        Currency::Usd,
        Currency::Eur,
    ];

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Krw => "KRW",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Krw => "₩",
            Currency::Jpy => "¥",
            Currency::Cny => "CN¥",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Krw | Currency::Jpy => 0,
            Currency::Cny | Currency::Usd | Currency::Eur => 2,
        }
    }

    /// Largest amount a receipt can plausibly show. Anything above is
    /// treated as OCR noise.
    #[must_use]
    pub const fn ocr_ceiling(self) -> f64 {
        match self {
            Currency::Krw | Currency::Jpy => 10_000_000.0,
            Currency::Cny | Currency::Usd | Currency::Eur => 100_000.0,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::Krw),
            "JPY" => Ok(Currency::Jpy),
            "CNY" | "RMB" => Ok(Currency::Cny),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(AppError::InvalidCurrency(other.to_string())),
        }
    }
}
