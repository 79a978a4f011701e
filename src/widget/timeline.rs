use crate::errors::{AppError, AppResult};
use crate::widget::sink::read_snapshot;
use crate::widget::snapshot::{SnapshotFormat, WidgetSnapshot};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::Path;

/// One pre-rendered state of the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetEntry {
    pub date: DateTime<Utc>,
    pub checked_in: bool,
    pub session_pay: f64,
    pub gross_pay: f64,
    pub days_until_paycheck: i64,
    /// Set on the fallback entry shown when no snapshot could be read.
    pub error: bool,
}

impl WidgetEntry {
    /// Entry rendered when the snapshot is absent or unreadable.
    pub fn error(date: DateTime<Utc>) -> Self {
        Self {
            date,
            checked_in: false,
            session_pay: 0.0,
            gross_pay: 0.0,
            days_until_paycheck: 0,
            error: true,
        }
    }

    fn at(snapshot: &WidgetSnapshot, date: DateTime<Utc>) -> Self {
        Self {
            date,
            checked_in: snapshot.checked_in(),
            session_pay: snapshot.session_pay_at(date),
            gross_pay: snapshot.gross_pay_at(date),
            days_until_paycheck: snapshot.days_until_paycheck(date),
            error: false,
        }
    }
}

/// Lazy schedule of entries at `now, now + Δ, now + 2Δ, …`.
///
/// Finite, and restartable: clone it, or call [`Timeline::restart`].
#[derive(Debug, Clone)]
pub struct Timeline {
    snapshot: Option<WidgetSnapshot>,
    origin: DateTime<Utc>,
    interval: Duration,
    count: usize,
    next: usize,
}

/// Spacing between entries, from a user-supplied number of seconds.
pub fn step_from_secs(secs: i64) -> AppResult<Duration> {
    if secs <= 0 {
        return Err(AppError::Config(format!(
            "widget interval must be at least 1 second, got {}",
            secs
        )));
    }
    Duration::try_seconds(secs).ok_or_else(|| {
        AppError::Config(format!("widget interval of {} seconds is out of range", secs))
    })
}

fn entry_date(origin: DateTime<Utc>, interval: Duration, k: usize) -> Option<DateTime<Utc>> {
    let k = i32::try_from(k).ok()?;
    origin.checked_add_signed(interval.checked_mul(k)?)
}

/// How many of the first `count` entries have a representable date.
fn reachable(origin: DateTime<Utc>, interval: Duration, count: usize) -> usize {
    if count == 0 || entry_date(origin, interval, count - 1).is_some() {
        return count;
    }

    // Entry 0 is `origin` itself; once a date overflows, every later one does too.
    let (mut ok, mut bad) = (0, count - 1);
    while bad - ok > 1 {
        let mid = ok + (bad - ok) / 2;
        if entry_date(origin, interval, mid).is_some() {
            ok = mid;
        } else {
            bad = mid;
        }
    }
    ok + 1
}

impl Timeline {
    /// Entries past the last representable date are dropped.
    pub fn new(snapshot: WidgetSnapshot, now: DateTime<Utc>, count: usize, interval: Duration) -> Self {
        Self {
            snapshot: Some(snapshot),
            origin: now,
            interval,
            count: reachable(now, interval, count),
            next: 0,
        }
    }

    /// A single error entry at `now`.
    pub fn error(now: DateTime<Utc>) -> Self {
        Self {
            snapshot: None,
            origin: now,
            interval: Duration::zero(),
            count: 1,
            next: 0,
        }
    }

    /// Read the snapshot at `path`; fall back to the error timeline if that fails.
    pub fn load(
        path: &Path,
        canonical: SnapshotFormat,
        now: DateTime<Utc>,
        count: usize,
        interval: Duration,
    ) -> Self {
        match read_snapshot(path, canonical) {
            Ok(snapshot) => Self::new(snapshot, now, count, interval),
            Err(_) => Self::error(now),
        }
    }

    pub fn is_error(&self) -> bool {
        self.snapshot.is_none()
    }

    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for Timeline {
    type Item = WidgetEntry;

    fn next(&mut self) -> Option<WidgetEntry> {
        if self.next >= self.count {
            return None;
        }
        let Some(date) = entry_date(self.origin, self.interval, self.next) else {
            self.next = self.count;
            return None;
        };
        self.next += 1;

        Some(match &self.snapshot {
            Some(snapshot) => WidgetEntry::at(snapshot, date),
            None => WidgetEntry::error(date),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Timeline {}
