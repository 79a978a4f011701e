//! Formatting utilities used for CLI output.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `$12.34`
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// "H hours and M minutes" from a (possibly fractional) minute count.
pub fn session_time(minutes: f64) -> String {
    let whole = minutes.floor() as i64;
    let sign = if whole < 0 { "-" } else { "" };
    let m = whole.abs();
    format!("{}{} hours and {} minutes", sign, m / 60, m % 60)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // e.g. +02:25 or -01:10
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // e.g. 02h 25m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}
