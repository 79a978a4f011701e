use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `sessions` table exists.
fn sessions_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='sessions'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `sessions` table. Timestamps are fixed-width RFC 3339 UTC text.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          TEXT PRIMARY KEY,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_start ON sessions(start_time);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Enforce at most one open session with a partial unique index.
fn migrate_single_open_session_index(conn: &Connection) -> AppResult<()> {
    let version = "20260312_0001_single_open_session";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let open: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE end_time IS NULL",
        [],
        |row| row.get(0),
    )?;

    if open > 1 {
        warning(format!(
            "{} open sessions found, only one is allowed. Close the extra ones first.",
            open
        ));
        return Err(AppError::Migration(format!(
            "{}: {} open sessions in store",
            version, open
        )));
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_single_open
            ON sessions((end_time IS NULL))
            WHERE end_time IS NULL;
        "#,
    )?;

    mark_applied(conn, version, "Allow at most one open session")?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !sessions_table_exists(conn)? {
        create_sessions_table(conn)?;
        success("Created sessions table.");
    }

    migrate_single_open_session_index(conn)?;

    Ok(())
}
