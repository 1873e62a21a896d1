//! Comment repository

use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

use super::{fmt_ts, ts_column};
use crate::entities::CommentEntity;
use crate::error::{DbError, DbResult};

/// Comment repository (append + read, no updates)
pub struct CommentRepo {
    conn: Arc<Mutex<Connection>>,
}

impl CommentRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentEntity> {
        Ok(CommentEntity {
            id: row.get(0)?,
            complaint_id: row.get(1)?,
            author_id: row.get(2)?,
            content: row.get(3)?,
            is_admin: row.get(4)?,
            created_at: ts_column(row, 5)?,
        })
    }

    /// Append one comment row
    pub fn insert(&self, entity: &CommentEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO complaint_comments (id, complaint_id, author_id, content, is_admin, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entity.id,
                entity.complaint_id,
                entity.author_id,
                entity.content,
                entity.is_admin,
                fmt_ts(&entity.created_at),
            ],
        )
        .map_err(|e| DbError::Query(format!("Failed to insert comment: {}", e)))?;
        Ok(())
    }

    /// A complaint's thread, oldest first
    pub fn list_for_complaint(&self, complaint_id: &str) -> DbResult<Vec<CommentEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(
                "SELECT id, complaint_id, author_id, content, is_admin, created_at \
                 FROM complaint_comments WHERE complaint_id = ?1 \
                 ORDER BY created_at ASC, id ASC",
            )
            .map_err(|e| DbError::Query(format!("Failed to prepare comment query: {}", e)))?;
        let rows = stmt
            .query_map(params![complaint_id], Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query comments: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read comment row: {}", e)))?;
        Ok(rows)
    }
}
