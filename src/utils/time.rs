//! Time utilities: HH:MM start times and free-form duration tokens
//! ("2h", "90min", "1h30m", "45").

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(\d+(?:\.\d+)?)\s*h(?:ours?|rs?)?)?\s*(?:(\d+)\s*m(?:in(?:utes?|s)?)?)?\s*$")
        .expect("static duration regex")
});

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Validate and normalize an `HH:MM` start time. Empty input means untimed.
pub fn normalize_time(input: &str) -> AppResult<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    parse_time(input)
        .map(|t| format!("{:02}:{:02}", t.hour(), t.minute()))
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

/// Minutes in a duration token. Empty token → `None` (a "place" entry).
pub fn duration_minutes(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Ok(mins) = token.parse::<u32>() {
        return Some(mins);
    }
    let caps = DURATION_RE.captures(token)?;
    if caps.get(1).is_none() && caps.get(2).is_none() {
        return None;
    }
    let hours: f64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    let mins: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some((hours * 60.0).round() as u32 + mins)
}

/// Reject tokens that are neither empty nor a recognizable duration.
pub fn validate_duration(token: &str) -> AppResult<String> {
    if token.trim().is_empty() || duration_minutes(token).is_some() {
        Ok(token.trim().to_string())
    } else {
        Err(AppError::InvalidTime(format!("invalid duration '{token}'")))
    }
}

/// "10:00" + "90min" → "11:30". Empty when either part is missing.
pub fn end_time(start: &str, duration: &str) -> String {
    match (parse_time(start), duration_minutes(duration)) {
        (Some(t), Some(m)) => {
            let end = t + chrono::Duration::minutes(i64::from(m));
            format!("{:02}:{:02}", end.hour(), end.minute())
        }
        _ => String::new(),
    }
}
