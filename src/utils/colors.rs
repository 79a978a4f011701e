/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Checked in → green, checked out → grey.
pub fn color_for_state(checked_in: bool) -> &'static str {
    if checked_in { GREEN } else { GREY }
}

/// Days until paycheck: overdue in red, today/tomorrow in yellow.
pub fn color_for_days(days: i64) -> &'static str {
    if days < 0 {
        RED
    } else if days <= 1 {
        YELLOW
    } else {
        RESET
    }
}

pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
