//! Profile repository

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use super::{fmt_ts, ts_column};
use crate::entities::ProfileEntity;
use crate::error::{DbError, DbResult};

const COLUMNS: &str = "user_id, full_name, email, student_number, created_at, updated_at";

pub struct ProfileRepo {
    conn: Arc<Mutex<Connection>>,
}

impl ProfileRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileEntity> {
        Ok(ProfileEntity {
            user_id: row.get(0)?,
            full_name: row.get(1)?,
            email: row.get(2)?,
            student_number: row.get(3)?,
            created_at: ts_column(row, 4)?,
            updated_at: ts_column(row, 5)?,
        })
    }

    /// Insert the row if the user has none yet. Existing rows are left untouched
    /// so that a student's edits survive later sign-ins.
    pub fn insert_if_absent(&self, entity: &ProfileEntity) -> DbResult<bool> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "INSERT OR IGNORE INTO profiles (user_id, full_name, email, student_number, \
                 created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entity.user_id,
                    entity.full_name,
                    entity.email,
                    entity.student_number,
                    fmt_ts(&entity.created_at),
                    fmt_ts(&entity.updated_at),
                ],
            )
            .map_err(|e| DbError::Query(format!("Failed to insert profile: {}", e)))?;
        Ok(affected > 0)
    }

    /// Overwrite the mutable fields of an existing profile
    pub fn update(&self, entity: &ProfileEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "UPDATE profiles SET full_name = ?1, email = ?2, student_number = ?3, \
                 updated_at = ?4 WHERE user_id = ?5",
                params![
                    entity.full_name,
                    entity.email,
                    entity.student_number,
                    fmt_ts(&entity.updated_at),
                    entity.user_id,
                ],
            )
            .map_err(|e| DbError::Query(format!("Failed to update profile: {}", e)))?;
        if affected == 0 {
            return Err(DbError::NotFound(format!("profiles: {}", entity.user_id)));
        }
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> DbResult<Option<ProfileEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(
            &format!("SELECT {} FROM profiles WHERE user_id = ?1", COLUMNS),
            params![user_id],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DbError::Query(format!("Failed to get profile: {}", e)))
    }

    /// Fetch several profiles at once. Missing ids are simply absent from the result.
    pub fn get_many(&self, user_ids: &[String]) -> DbResult<Vec<ProfileEntity>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let placeholders = (1..=user_ids.len())
            .map(|n| format!("?{}", n))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM profiles WHERE user_id IN ({})",
                COLUMNS, placeholders
            ))
            .map_err(|e| DbError::Query(format!("Failed to prepare profile query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(user_ids.iter()), Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query profiles: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read profile row: {}", e)))?;
        Ok(rows)
    }

    pub fn list(&self, limit: u32, offset: u32) -> DbResult<Vec<ProfileEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM profiles ORDER BY full_name ASC, user_id ASC \
                 LIMIT {} OFFSET {}",
                COLUMNS, limit, offset
            ))
            .map_err(|e| DbError::Query(format!("Failed to prepare profile query: {}", e)))?;
        let rows = stmt
            .query_map([], Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query profiles: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read profile row: {}", e)))?;
        Ok(rows)
    }

    pub fn count(&self) -> DbResult<u64> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as u64)
        .map_err(|e| DbError::Query(format!("Failed to count profiles: {}", e)))
    }
}
