use crate::config::Config;
use crate::core::calculator::aggregate::summarize;
use crate::core::refresh::RefreshTask;
use crate::core::status::render_status;
use crate::db::pool::DbPool;
use crate::db::store::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_state::ClockState;
use crate::ui::messages::{header, info};
use crate::utils::path::expand_str;
use chrono::{Local, Utc};
use std::time::Duration;

fn print_once(pool: &mut DbPool, rate: f64) -> AppResult<ClockState> {
    let sessions = pool.sessions()?;
    let state = ClockState::from_sessions(&sessions);
    let summary = summarize(&sessions, rate, Utc::now());

    for line in render_status(state, sessions.first(), &summary) {
        println!("{}", line);
    }
    Ok(state)
}

/// Handle the `status` command
pub fn handle(watch: bool, rate: Option<f64>, cfg: &Config) -> AppResult<()> {
    let rate = rate.unwrap_or(cfg.hourly_rate);
    let mut pool = DbPool::open_initialized(&expand_str(&cfg.database))?;

    let state = print_once(&mut pool, rate)?;
    if !watch {
        return Ok(());
    }
    if !state.is_in() {
        info("Not checked in, nothing to refresh.");
        return Ok(());
    }

    let period = Duration::from_secs(cfg.refresh_secs);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        info(format!(
            "Refreshing every {}s, press Ctrl-C to stop.",
            cfg.refresh_secs
        ));

        let task = RefreshTask::spawn(period, move || {
            header(Local::now().format("%H:%M:%S"));
            print_once(&mut pool, rate).map(|_| ())
        });

        let stopped = tokio::signal::ctrl_c().await;
        task.cancel().await;
        stopped.map_err(AppError::Io)
    })
}
