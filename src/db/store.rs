//! Session storage seam used by the check-in/check-out controller.

use crate::errors::AppResult;
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Ordered collection of sessions, newest first.
///
/// Holds at most one open session. Calls are blocking and are never issued
/// concurrently.
pub trait SessionStore {
    /// Every session, newest first.
    fn sessions(&mut self) -> AppResult<Vec<Session>>;

    /// Persist a new session.
    fn append(&mut self, session: &Session) -> AppResult<()>;

    /// Set the end of the session `id`. Fails if it does not exist or is
    /// already closed.
    fn close(&mut self, id: Uuid, end: DateTime<Utc>) -> AppResult<()>;

    /// The open session, if any.
    fn open_session(&mut self) -> AppResult<Option<Session>> {
        Ok(self.sessions()?.into_iter().next().filter(Session::is_open))
    }

    /// Write an audit line. Stores without an audit trail ignore it.
    fn record(&mut self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}
