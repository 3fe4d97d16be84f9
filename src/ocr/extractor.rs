//! Receipt text → `(amount, currency)`.
//!
//! Patterns are tried as an ordered cascade and the first accepted match
//! wins: EUR, USD, then the keyword / ISO-code sets (円, 元, 원, JPY, CNY,
//! KRW…), and only after all of those the `¥` sign, which is shared by JPY
//! and CNY and defaults to JPY. When nothing currency-tagged matches, a bare
//! `digits.digits` number is reported in the default currency.

use crate::money::Currency;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Currency of the primary market receipts are scanned in.
pub const DEFAULT_OCR_CURRENCY: Currency = Currency::Jpy;

/// Cent amount: thousands groups (`.` or `,`) and/or a 1-2 digit decimal
/// part. The grouped form comes first so `1,234.56` is not cut at `1,23`.
const NUM: &str = r"(\d{1,3}(?:[.,]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?)";
/// Whole amount, optionally grouped with commas.
const WHOLE: &str = r"(\d{1,3}(?:,\d{3})+|\d+)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedAmount {
    pub amount: f64,
    pub currency: Currency,
}

struct PatternSet {
    currency: Currency,
    patterns: Vec<Regex>,
}

fn set(currency: Currency, sources: &[String]) -> PatternSet {
    PatternSet {
        currency,
        patterns: sources
            .iter()
            .map(|s| Regex::new(s).expect("static OCR pattern must compile"))
            .collect(),
    }
}

static CASCADE: LazyLock<Vec<PatternSet>> = LazyLock::new(|| {
    vec![
        set(
            Currency::Eur,
            &[
                format!(r"€\s*{NUM}"),
                format!(r"{NUM}\s*€"),
                format!(r"(?i)\bEUR\s*{NUM}"),
            ],
        ),
        set(
            Currency::Usd,
            &[
                format!(r"\$\s*{NUM}"),
                format!(r"{NUM}\s*\$"),
                format!(r"(?i)\bUSD\s*{NUM}"),
            ],
        ),
        // keyword / ISO code sets: always ahead of the bare yen sign
        set(
            Currency::Jpy,
            &[
                format!(r"{WHOLE}\s*円"),
                format!(r"(?i)\bJPY\s*{WHOLE}"),
                format!(r"(?i){WHOLE}\s*JPY\b"),
            ],
        ),
        set(
            Currency::Cny,
            &[
                format!(r"{NUM}\s*元"),
                format!(r"(?i)\b(?:CNY|RMB)\s*{NUM}"),
                format!(r"(?i){NUM}\s*(?:CNY|RMB)\b"),
            ],
        ),
        set(
            Currency::Krw,
            &[
                format!(r"₩\s*{WHOLE}"),
                format!(r"{WHOLE}\s*원"),
                format!(r"(?i)\bKRW\s*{WHOLE}"),
            ],
        ),
        // ambiguous between JPY and CNY → JPY
        set(
            Currency::Jpy,
            &[format!(r"¥\s*{WHOLE}"), format!(r"{WHOLE}\s*¥")],
        ),
    ]
});

static BARE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)").expect("static OCR pattern must compile"));

/// Extract with the default market currency as fallback tag.
pub fn extract_amount(text: &str) -> Option<ExtractedAmount> {
    extract_amount_with_default(text, DEFAULT_OCR_CURRENCY)
}

/// Run the cascade over `text`; `fallback` tags bare decimal numbers.
pub fn extract_amount_with_default(text: &str, fallback: Currency) -> Option<ExtractedAmount> {
    let text = normalize_text(text);

    for group in CASCADE.iter() {
        for re in &group.patterns {
            for caps in re.captures_iter(&text) {
                let Some(raw) = caps.get(1) else { continue };
                if let Some(amount) = parse_number(raw.as_str(), group.currency) {
                    debug!(currency = %group.currency, amount, pattern = re.as_str(), "receipt amount matched");
                    return Some(ExtractedAmount {
                        amount,
                        currency: group.currency,
                    });
                }
            }
        }
    }

    for caps in BARE_DECIMAL.captures_iter(&text) {
        if let Some(amount) = caps.get(1).and_then(|m| parse_number(m.as_str(), fallback)) {
            debug!(currency = %fallback, amount, "receipt amount from bare decimal");
            return Some(ExtractedAmount {
                amount,
                currency: fallback,
            });
        }
    }

    debug!("no receipt amount found");
    None
}

/// Normalise the separators and apply the per-currency bounds check.
fn parse_number(raw: &str, currency: Currency) -> Option<f64> {
    let cleaned = if currency.minor_units() == 0 {
        raw.replace(',', "")
    } else {
        decimal_point(raw)
    };
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0 && value < currency.ocr_ceiling()).then_some(value)
}

/// The last separator is the decimal point when 1-2 digits follow it;
/// every other separator is grouping.
fn decimal_point(raw: &str) -> String {
    let digits = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    match raw.rfind(['.', ',']) {
        Some(pos) if (1..=2).contains(&(raw.len() - pos - 1)) => {
            format!("{}.{}", digits(&raw[..pos]), &raw[pos + 1..])
        }
        _ => digits(raw),
    }
}

/// Fold full-width forms to ASCII and fix the usual O/0, l/1 confusions
/// next to digits.
fn normalize_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (idx, c) in chars.iter().copied().enumerate() {
        let c = match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '，' => ',',
            '．' => '.',
            '￥' => '¥',
            '＄' => '$',
            '￦' => '₩',
            _ => c,
        };
        let c = if matches!(c, 'O' | 'o') && next_to_digit(&chars, idx) {
            '0'
        } else if matches!(c, 'l' | 'I') && next_to_digit(&chars, idx) {
            '1'
        } else {
            c
        };
        out.push(c);
    }

    out
}

fn next_to_digit(chars: &[char], idx: usize) -> bool {
    let is_digit = |c: char| c.is_ascii_digit() || ('０'..='９').contains(&c);
    let prev = idx.checked_sub(1).and_then(|i| chars.get(i)).copied();
    let next = chars.get(idx + 1).copied();
    prev.is_some_and(is_digit) || next.is_some_and(is_digit)
}
