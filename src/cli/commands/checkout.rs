use crate::cli::commands::open_controller;
use crate::config::Config;
use crate::core::calculator::time_math::{elapsed_minutes, pay};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::{money, session_time};
use chrono::Utc;

/// Handle the `out` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut ctl = open_controller(cfg)?;

    let result = ctl.check_out(Utc::now());
    if let Some(t) = cfg.checkout_failure.apply("Check-out", result)? {
        let worked = t
            .session
            .end
            .map(|end| elapsed_minutes(t.session.start, end))
            .unwrap_or_default();

        success(format!("Checked out at {}", t.session.end_str()));
        println!("Session Time:  {}", session_time(worked));
        println!("Session Total: {}", money(pay(cfg.hourly_rate, worked)));
        println!("Grand Total:   {}", money(t.summary.gross_pay));
    }

    Ok(())
}
