use crate::utils::date::format_local;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One check-in to check-out work interval.
///
/// `start` never changes after creation. `end` is `None` while the session
/// is open and is set exactly once, on check-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,                   // ⇔ sessions.id         (TEXT, uuid v4)
    pub start: DateTime<Utc>,       // ⇔ sessions.start_time (TEXT, RFC 3339)
    pub end: Option<DateTime<Utc>>, // ⇔ sessions.end_time   (TEXT NULL)
}

impl Session {
    /// New open session starting at `start`, with a fresh identifier.
    pub fn open(start: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: None,
        }
    }

    /// Closed session, mostly useful for seeding stores.
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: Some(end),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub fn start_str(&self) -> String {
        format_local(&self.start)
    }

    pub fn end_str(&self) -> String {
        match self.end {
            Some(end) => format_local(&end),
            None => "--".to_string(),
        }
    }
}
