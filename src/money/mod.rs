//! Currency model, conversion and formatting.

pub mod converter;
pub mod currency;
pub mod rates;

pub use converter::{
    Converter, PERSISTED_DECIMALS, convert, format, format_display, round_to, round_to_persisted,
    to_base,
};
pub use currency::Currency;
pub use rates::{ExchangeRates, RateSource};
