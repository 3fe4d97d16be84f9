//! Base ⇄ display currency conversion and display formatting.
//!
//! Every monetary field of a trip is stored in the base currency. The
//! display side only ever sees converted copies, and amounts typed in a
//! display currency go through `to_base` (6-decimal rounding) before they
//! reach the store, so convert → store → reconvert cycles don't drift.

use super::currency::Currency;
use tracing::warn;

/// Decimals kept for persisted base-currency amounts.
pub const PERSISTED_DECIMALS: u32 = 6;

/// Round to an arbitrary number of decimals (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // avoid "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round to the persisted precision (6 decimals).
pub fn round_to_persisted(value: f64) -> f64 {
    round_to(value, PERSISTED_DECIMALS)
}

fn usable_rate(rate: f64) -> Option<f64> {
    if rate.is_finite() && rate > 0.0 {
        Some(rate)
    } else {
        warn!(rate, "ignoring unusable exchange rate, treating as 1:1");
        None
    }
}

/// Base amount → display currency. A rate of exactly 1 is the identity
/// (display currency == base currency).
///
/// The result keeps full precision; rounding to the display currency's
/// minor units happens in [`format`]. Do not expect whole-unit values here,
/// even for KRW or JPY.
pub fn convert(amount_base: f64, rate: f64) -> f64 {
    match usable_rate(rate) {
        Some(r) if r != 1.0 => amount_base * r,
        _ => amount_base,
    }
}

/// Display amount → base currency, rounded to 6 decimals for storage.
pub fn to_base(amount_display: f64, rate: f64) -> f64 {
    match usable_rate(rate) {
        Some(r) if r != 1.0 => round_to_persisted(amount_display / r),
        _ => round_to_persisted(amount_display),
    }
}

/// Render a base amount in `currency`: symbol prefix, `,` grouping, no
/// decimals for whole values and exactly two otherwise.
///
/// `format(1500.0, Currency::Krw, 1.0)` → `"₩1,500"`,
/// `format(12.5, Currency::Usd, 1.0)` → `"$12.50"`.
pub fn format(amount_base: f64, currency: Currency, rate: f64) -> String {
    let value = round_to(convert(amount_base, rate), currency.minor_units() as u32);
    format_display(value, currency)
}

/// Format a value that is already in `currency`.
pub fn format_display(value: f64, currency: Currency) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let cents = (abs * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    if frac == 0 {
        format!("{sign}{}{}", currency.symbol(), group_thousands(whole))
    } else {
        format!(
            "{sign}{}{}.{:02}",
            currency.symbol(),
            group_thousands(whole),
            frac
        )
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A base/display pair with the rate between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converter {
    pub base: Currency,
    pub display: Currency,
    pub rate: f64,
}

impl Converter {
    pub fn identity(base: Currency) -> Self {
        Self {
            base,
            display: base,
            rate: 1.0,
        }
    }

    pub fn to_display(&self, amount_base: f64) -> f64 {
        convert(amount_base, self.rate)
    }

    pub fn to_base(&self, amount_display: f64) -> f64 {
        to_base(amount_display, self.rate)
    }

    pub fn format(&self, amount_base: f64) -> String {
        format(amount_base, self.display, self.rate)
    }
}
