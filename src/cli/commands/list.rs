use crate::config::Config;
use crate::core::calculator::aggregate::summarize;
use crate::core::calculator::time_math::{elapsed_minutes, pay};
use crate::db::pool::DbPool;
use crate::db::queries::{load_recent_sessions, load_sessions};
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::utils::colors::{GREEN, RESET, colorize_optional};
use crate::utils::formatting::{bold, mins2readable, money};
use crate::utils::path::expand_str;
use chrono::Utc;

/// Handle the `list` command
pub fn handle(limit: Option<usize>, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open_initialized(&expand_str(&cfg.database))?;
    let now = Utc::now();

    let sessions = match limit {
        Some(n) => load_recent_sessions(&pool.conn, n)?,
        None => load_sessions(&pool.conn)?,
    };

    if sessions.is_empty() {
        println!("No sessions recorded.");
        return Ok(());
    }

    println!(
        "{}",
        bold(&format!(
            "{:>3}  {:<19}  {:<19}  {:>9}  {:>10}",
            "#", "START", "END", "TIME", "PAY"
        ))
    );

    for (i, s) in sessions.iter().enumerate() {
        print_row(i + 1, s, cfg.hourly_rate, now);
    }

    // Totals always cover the whole history, regardless of --limit.
    let all = load_sessions(&pool.conn)?;
    let summary = summarize(&all, cfg.hourly_rate, now);
    println!();
    println!(
        "Total: {}  Gross: {}",
        mins2readable(
            (summary.historical_minutes + summary.open_session_minutes) as i64,
            false,
            false
        ),
        money(summary.gross_pay)
    );

    Ok(())
}

fn print_row(n: usize, s: &Session, rate: f64, now: chrono::DateTime<Utc>) {
    let minutes = elapsed_minutes(s.start, s.end.unwrap_or(now));
    let end = colorize_optional(&format!("{:<19}", s.end_str()));
    let time = mins2readable(minutes as i64, false, false);

    let marker = if s.is_open() {
        format!("{GREEN}*{RESET}")
    } else {
        " ".to_string()
    };

    println!(
        "{:>3}{} {:<19}  {}  {:>9}  {:>10}",
        n,
        marker,
        s.start_str(),
        end,
        time,
        money(pay(rate, minutes))
    );
}
