use crate::models::session::Session;
use serde::Serialize;

/// Whether the user is currently on the clock.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ClockState {
    CheckedOut,
    CheckedIn,
}

impl ClockState {
    /// Derive the state from sessions ordered newest first.
    ///
    /// Only the head is inspected: an open session, if any, is always the newest.
    pub fn from_sessions(sessions: &[Session]) -> Self {
        match sessions.first() {
            Some(head) if head.is_open() => ClockState::CheckedIn,
            _ => ClockState::CheckedOut,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::CheckedOut => "checked out",
            ClockState::CheckedIn => "checked in",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, ClockState::CheckedIn)
    }
}
