use crate::models::clock_state::ClockState;
use crate::models::pay_summary::PaySummary;
use crate::models::session::Session;
use crate::utils::formatting::{money, session_time};

/// Lines of the main view: session total, grand total, session time, check-in time.
pub fn render_status(state: ClockState, head: Option<&Session>, summary: &PaySummary) -> Vec<String> {
    let mut lines = vec![
        format!("Session Total: {}", money(summary.current_session_pay)),
        format!("Grand Total:   {}", money(summary.gross_pay)),
        format!("Session Time:  {}", session_time(summary.open_session_minutes)),
    ];

    match (state, head) {
        (ClockState::CheckedIn, Some(s)) => lines.push(format!("Checked in at: {}", s.start_str())),
        _ => lines.push(format!("Status:        {}", state.as_str())),
    }

    lines
}
