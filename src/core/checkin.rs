use crate::core::calculator::aggregate::summarize;
use crate::db::store::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock_state::ClockState;
use crate::models::pay_summary::PaySummary;
use crate::models::session::Session;
use crate::ui::messages::warning;
use crate::widget::sink::SnapshotSink;
use crate::widget::snapshot::{SnapshotFormat, WidgetSnapshot};
use chrono::{DateTime, Utc};

/// Inputs the controller needs besides the store.
#[derive(Debug, Clone, Copy)]
pub struct PaySettings {
    pub hourly_rate: f64,
    pub paycheck_day: DateTime<Utc>,
    pub snapshot_format: SnapshotFormat,
}

/// Result of a successful check-in or check-out.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ClockState,
    /// The session that was opened or closed.
    pub session: Session,
    pub summary: PaySummary,
    pub snapshot: WidgetSnapshot,
}

/// `CheckedOut` / `CheckedIn` state machine over a session store.
///
/// Every transition publishes a widget snapshot once the store write succeeded.
pub struct CheckInOutController<S: SessionStore, P: SnapshotSink> {
    store: S,
    sink: P,
    settings: PaySettings,
    state: ClockState,
}

impl<S: SessionStore, P: SnapshotSink> CheckInOutController<S, P> {
    /// Derive the initial state from the store contents.
    pub fn new(mut store: S, sink: P, settings: PaySettings) -> AppResult<Self> {
        let state = ClockState::from_sessions(&store.sessions()?);
        Ok(Self {
            store,
            sink,
            settings,
            state,
        })
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Direct store access, for inspection in tests.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Published snapshots live here; used by tests.
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Give back the store and sink, for tests that reopen or inspect them.
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.sink)
    }

    /// Current pay figures at `now`.
    pub fn summary(&mut self, now: DateTime<Utc>) -> AppResult<PaySummary> {
        let sessions = self.store.sessions()?;
        Ok(summarize(&sessions, self.settings.hourly_rate, now))
    }

    /// Open a new session starting at `now`.
    pub fn check_in(&mut self, now: DateTime<Utc>) -> AppResult<Transition> {
        let sessions = self.store.sessions()?;
        if let Some(open) = sessions.first().filter(|s| s.is_open()) {
            self.state = ClockState::CheckedIn;
            return Err(AppError::AlreadyCheckedIn(open.start_str()));
        }

        let session = Session::open(now);
        if let Err(e) = self.store.append(&session) {
            self.audit("persist_failed", "check-in", &e.to_string());
            return Err(AppError::persistence("check-in", e));
        }
        self.state = ClockState::CheckedIn;
        self.audit(
            "check_in",
            &session.id.to_string(),
            &format!("Checked in at {}", session.start_str()),
        );

        // Same figures as a fresh read of the store, without the round trip.
        let mut after = Vec::with_capacity(sessions.len() + 1);
        after.push(session.clone());
        after.extend(sessions);
        let summary = summarize(&after, self.settings.hourly_rate, now);

        let snapshot = self.publish(true, now, &summary);
        Ok(Transition {
            state: self.state,
            session,
            summary,
            snapshot,
        })
    }

    /// Close the open session at `now`.
    ///
    /// Without an open session this is rejected with `NoOpenSession` and
    /// nothing is written. On a failed write the controller stays checked in.
    pub fn check_out(&mut self, now: DateTime<Utc>) -> AppResult<Transition> {
        let Some(mut session) = self.store.open_session()? else {
            self.state = ClockState::CheckedOut;
            return Err(AppError::NoOpenSession);
        };

        if let Err(e) = self.store.close(session.id, now) {
            self.audit("persist_failed", "check-out", &e.to_string());
            return Err(AppError::persistence("check-out", e));
        }
        session.end = Some(now);
        self.state = ClockState::CheckedOut;
        self.audit(
            "check_out",
            &session.id.to_string(),
            &format!("Checked out at {}", session.end_str()),
        );

        let summary = self.summary(now)?;
        let snapshot = self.publish(false, now, &summary);
        Ok(Transition {
            state: self.state,
            session,
            summary,
            snapshot,
        })
    }

    /// Check in when checked out, check out otherwise.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> AppResult<Transition> {
        match self.state {
            ClockState::CheckedOut => self.check_in(now),
            ClockState::CheckedIn => self.check_out(now),
        }
    }

    fn publish(&mut self, checked_in: bool, at: DateTime<Utc>, summary: &PaySummary) -> WidgetSnapshot {
        let snapshot = WidgetSnapshot::capture(
            self.settings.snapshot_format,
            checked_in,
            at,
            summary,
            self.settings.hourly_rate,
            self.settings.paycheck_day,
        );

        // The session is saved by now; publish failures are only reported.
        if let Err(e) = self.sink.publish(&snapshot) {
            warning(format!("Widget snapshot not updated: {}", e));
            self.audit("snapshot_failed", "", &e.to_string());
        }
        snapshot
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.record(operation, target, message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
}
