//! In-memory session store (previews, tests, dry runs).

use crate::db::store::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sessions: Vec<Session>,
    /// When set, every write fails with an I/O error.
    pub fail_writes: bool,
    pub audit: Vec<(String, String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `sessions`, in any order; they are ranked by start.
    ///
    /// Sessions appended later always go in front, whatever their start.
    pub fn with_sessions(mut sessions: Vec<Session>) -> Self {
        sessions.sort_by(|a, b| b.start.cmp(&a.start));
        Self {
            sessions,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Io(std::io::Error::other("store is read-only")));
        }
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn sessions(&mut self) -> AppResult<Vec<Session>> {
        Ok(self.sessions.clone())
    }

    fn append(&mut self, session: &Session) -> AppResult<()> {
        self.check_writable()?;
        if session.is_open() && self.sessions.iter().any(Session::is_open) {
            return Err(AppError::Other("store already holds an open session".into()));
        }
        self.sessions.insert(0, session.clone());
        Ok(())
    }

    fn close(&mut self, id: Uuid, end: DateTime<Utc>) -> AppResult<()> {
        self.check_writable()?;
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.is_open())
            .ok_or(AppError::NoOpenSession)?;
        session.end = Some(end);
        Ok(())
    }

    fn record(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.audit
            .push((operation.to_string(), target.to_string(), message.to_string()));
        Ok(())
    }
}
