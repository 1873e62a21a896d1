//! Shared database handle

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{DbError, DbResult};
use crate::schema::REDRESS_SCHEMA;

/// Shared handle over one SQLite connection
///
/// Cloning is cheap; all clones serialize statements through the same mutex.
/// A poisoned lock surfaces as [`DbError::LockPoisoned`] rather than a panic.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::Query(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::Query(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create all tables and indexes if they do not exist
    pub fn init_schema(&self) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute_batch(REDRESS_SCHEMA)
            .map_err(|e| DbError::Schema(e.to_string()))
    }

    /// Cheap connectivity probe
    pub fn ping(&self) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| DbError::Query(e.to_string()))
    }

    /// Connection handle for the repos
    pub(crate) fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}
