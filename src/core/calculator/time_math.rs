//! Elapsed time and pay arithmetic.

use chrono::{DateTime, Utc};

/// Minutes between two instants, from whole elapsed seconds.
///
/// Negative when `to` precedes `from` (clock skew); callers display the value
/// as is instead of treating it as an error.
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Earnings for `minutes` of work at `hourly_rate`.
pub fn pay(hourly_rate: f64, minutes: f64) -> f64 {
    hourly_rate * (minutes / 60.0)
}
