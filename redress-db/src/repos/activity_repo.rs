//! Activity log repository

use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

use super::{fmt_ts, ts_column};
use crate::entities::ActivityEntity;
use crate::error::{DbError, DbResult};

const COLUMNS: &str = "id, complaint_id, action, old_status, new_status, notes, performed_by, created_at";

/// Activity log repository (append + read, no updates)
pub struct ActivityRepo {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivityEntity> {
        Ok(ActivityEntity {
            id: row.get(0)?,
            complaint_id: row.get(1)?,
            action: row.get(2)?,
            old_status: row.get(3)?,
            new_status: row.get(4)?,
            notes: row.get(5)?,
            performed_by: row.get(6)?,
            created_at: ts_column(row, 7)?,
        })
    }

    /// Append one log row
    pub fn insert(&self, entity: &ActivityEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO complaint_logs (id, complaint_id, action, old_status, new_status, \
             notes, performed_by, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entity.id,
                entity.complaint_id,
                entity.action,
                entity.old_status,
                entity.new_status,
                entity.notes,
                entity.performed_by,
                fmt_ts(&entity.created_at),
            ],
        )
        .map_err(|e| DbError::Query(format!("Failed to insert log row: {}", e)))?;
        Ok(())
    }

    /// Recent rows across all complaints, newest first
    pub fn list(&self, limit: u32, offset: u32) -> DbResult<Vec<ActivityEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM complaint_logs ORDER BY created_at DESC, id DESC \
                 LIMIT {} OFFSET {}",
                COLUMNS, limit, offset
            ))
            .map_err(|e| DbError::Query(format!("Failed to prepare log query: {}", e)))?;
        let rows = stmt
            .query_map([], Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query log rows: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read log row: {}", e)))?;
        Ok(rows)
    }

    /// Total number of log rows
    pub fn count(&self) -> DbResult<u64> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row("SELECT COUNT(*) FROM complaint_logs", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as u64)
        .map_err(|e| DbError::Query(format!("Failed to count log rows: {}", e)))
    }

    /// All rows for one complaint, newest first
    pub fn list_for_complaint(&self, complaint_id: &str) -> DbResult<Vec<ActivityEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM complaint_logs WHERE complaint_id = ?1 \
                 ORDER BY created_at DESC, id DESC",
                COLUMNS
            ))
            .map_err(|e| DbError::Query(format!("Failed to prepare log query: {}", e)))?;
        let rows = stmt
            .query_map(params![complaint_id], Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query log rows: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read log row: {}", e)))?;
        Ok(rows)
    }
}
