//! SQLite connection wrapper (one connection, serialized access).

use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::queries::{close_session, insert_session, load_sessions};
use crate::db::store::SessionStore;
use crate::errors::AppResult;
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};
use std::path::Path;
use uuid::Uuid;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Open `path` and make sure the schema is current.
    pub fn open_initialized(path: &str) -> AppResult<Self> {
        let pool = Self::new(path)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }

    /// Private in-memory database with the full schema.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}

impl SessionStore for DbPool {
    fn sessions(&mut self) -> AppResult<Vec<Session>> {
        load_sessions(&self.conn)
    }

    fn append(&mut self, session: &Session) -> AppResult<()> {
        insert_session(&self.conn, session)
    }

    fn close(&mut self, id: Uuid, end: DateTime<Utc>) -> AppResult<()> {
        close_session(&self.conn, id, end)
    }

    fn record(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
