use crate::core::calculator::time_math::{elapsed_minutes, pay};
use crate::models::pay_summary::PaySummary;
use crate::models::session::Session;
use chrono::{DateTime, Utc};

/// Sum of the durations of every closed session, in minutes.
///
/// Order does not matter; open sessions are skipped.
pub fn historical_minutes(sessions: &[Session]) -> f64 {
    sessions
        .iter()
        .filter_map(|s| s.end.map(|end| elapsed_minutes(s.start, end)))
        .sum()
}

/// Compute pay figures for `sessions` (newest first) at `now`.
///
/// Only the head is considered as a possible open session.
pub fn summarize(sessions: &[Session], hourly_rate: f64, now: DateTime<Utc>) -> PaySummary {
    let history = historical_minutes(sessions);

    match sessions.first() {
        Some(head) if head.is_open() => {
            let open = elapsed_minutes(head.start, now);
            let session_pay = pay(hourly_rate, open);
            PaySummary {
                historical_minutes: history,
                open_session_minutes: open,
                current_session_pay: session_pay,
                gross_pay: pay(hourly_rate, history) + session_pay,
            }
        }
        _ => PaySummary {
            historical_minutes: history,
            open_session_minutes: 0.0,
            current_session_pay: 0.0,
            gross_pay: pay(hourly_rate, history),
        },
    }
}
