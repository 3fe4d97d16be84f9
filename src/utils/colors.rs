/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const CYAN: &str = "\x1b[36m";

/// Budget/balance color: positive green, negative red, zero plain.
pub fn color_for_balance(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Grey out empty placeholders ("", "--:--").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Activity status marker: done in green, skipped in grey.
pub fn status_marker(completed: bool, skipped: bool) -> String {
    if completed {
        format!("{GREEN}✔{RESET}")
    } else if skipped {
        format!("{GREY}↷{RESET}")
    } else {
        " ".to_string()
    }
}
