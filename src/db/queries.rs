use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use uuid::Uuid;

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ts_from_db(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(raw.to_string())),
            )
        })
}

pub fn map_row(row: &Row) -> Result<Session> {
    let id_str: String = row.get("id")?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let start_str: String = row.get("start_time")?;
    let end_str: Option<String> = row.get("end_time")?;

    Ok(Session {
        id,
        start: ts_from_db(1, &start_str)?,
        end: end_str.as_deref().map(|s| ts_from_db(2, s)).transpose()?,
    })
}

/// All sessions, newest first.
///
/// "Newest" is insertion order, not `start_time`: a check-in made after the
/// clock moved backwards still comes first.
pub fn load_sessions(conn: &Connection) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start_time, end_time FROM sessions
         ORDER BY rowid DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The newest `limit` sessions.
pub fn load_recent_sessions(conn: &Connection, limit: usize) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, start_time, end_time FROM sessions
         ORDER BY rowid DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_open_session(conn: &Connection) -> AppResult<Option<Session>> {
    let session = conn
        .query_row(
            "SELECT id, start_time, end_time FROM sessions
             WHERE end_time IS NULL
             ORDER BY rowid DESC
             LIMIT 1",
            [],
            map_row,
        )
        .optional()?;
    Ok(session)
}

pub fn insert_session(conn: &Connection, session: &Session) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (id, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            session.id.to_string(),
            ts_to_db(&session.start),
            session.end.as_ref().map(ts_to_db),
            ts_to_db(&Utc::now()),
        ],
    )?;
    Ok(())
}

/// Close the open session `id`. Closed sessions are never touched again.
pub fn close_session(conn: &Connection, id: Uuid, end: DateTime<Utc>) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE sessions SET end_time = ?1
         WHERE id = ?2 AND end_time IS NULL",
        params![ts_to_db(&end), id.to_string()],
    )?;

    if changed == 0 {
        return Err(AppError::NoOpenSession);
    }
    Ok(())
}

pub fn count_sessions(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    Ok(n)
}
