use serde::Serialize;

/// Derived pay figures for a list of sessions at a given instant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct PaySummary {
    /// Minutes over every closed session.
    pub historical_minutes: f64,
    /// Minutes elapsed in the open session, 0 when checked out.
    pub open_session_minutes: f64,
    pub current_session_pay: f64,
    /// Banked pay plus the accrued pay of the open session.
    pub gross_pay: f64,
}

