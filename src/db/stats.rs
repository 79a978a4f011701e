use crate::core::calculator::aggregate::historical_minutes;
use crate::db::pool::DbPool;
use crate::db::queries::{count_sessions, load_open_session, load_sessions};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::mins2readable;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) SESSIONS
    //
    let count = count_sessions(&pool.conn)?;
    println!(
        "{}• Total sessions:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let sessions = load_sessions(&pool.conn)?;
    println!(
        "{}• Time on record:{} {}",
        CYAN,
        RESET,
        mins2readable(historical_minutes(&sessions) as i64, false, false)
    );

    //
    // 3) RANGE
    //
    let fmt_first = sessions
        .last()
        .map(|s| s.start_str())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = sessions
        .first()
        .map(|s| s.start_str())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) OPEN SESSION
    //
    match load_open_session(&pool.conn)? {
        Some(s) => println!("{}• Open session:{} since {}", CYAN, RESET, s.start_str()),
        None => println!("{}• Open session:{} {GREY}none{RESET}", CYAN, RESET),
    }

    println!();
    Ok(())
}
