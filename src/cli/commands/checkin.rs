use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::money;
use chrono::Utc;

/// Handle the `in` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut ctl = open_controller(cfg)?;

    let result = ctl.check_in(Utc::now());
    if let Some(t) = cfg.checkin_failure.apply("Check-in", result)? {
        success(format!("Checked in at {}", t.session.start_str()));
        println!("Grand Total:   {}", money(t.summary.gross_pay));
    }

    Ok(())
}
