//! Complaint repository

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use super::{fmt_ts, opt_ts_column, ts_column};
use crate::entities::{ComplaintEntity, Entity};
use crate::error::{DbError, DbResult};

const COLUMNS: &str = "c.id, c.owner_id, c.category_id, c.subject, c.description, c.status, \
     c.priority, c.admin_response, c.attachment_path, c.created_at, c.updated_at, c.resolved_at";

/// Filter values for complaint listings, already lowered to storage shape
#[derive(Debug, Clone, Default)]
pub struct ComplaintQuery {
    /// Restrict to one owner (student scope); `None` means all rows
    pub owner_id: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<String>,
    /// Case-insensitive substring over subject/description
    pub search: Option<String>,
    /// Also search the owner's profile name/email (admin scope only)
    pub search_profiles: bool,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl ComplaintQuery {
    fn joins_profiles(&self) -> bool {
        self.search.is_some() && self.search_profiles
    }

    /// WHERE clause and its parameters
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(owner) = &self.owner_id {
            conditions.push("c.owner_id = ?".to_string());
            params.push(owner.clone());
        }
        if let Some(status) = &self.status {
            conditions.push("c.status = ?".to_string());
            params.push(status.clone());
        }
        if let Some(priority) = &self.priority {
            conditions.push("c.priority = ?".to_string());
            params.push(priority.clone());
        }
        if let Some(category_id) = &self.category_id {
            conditions.push("c.category_id = ?".to_string());
            params.push(category_id.clone());
        }
        if let Some(search) = &self.search {
            let needle = format!("%{}%", search.to_lowercase());
            if self.joins_profiles() {
                conditions.push(
                    "(LOWER(c.subject) LIKE ? OR LOWER(c.description) LIKE ? \
                     OR LOWER(COALESCE(p.full_name, '')) LIKE ? \
                     OR LOWER(COALESCE(p.email, '')) LIKE ?)"
                        .to_string(),
                );
                params.extend([needle.clone(), needle.clone(), needle.clone(), needle]);
            } else {
                conditions.push("(LOWER(c.subject) LIKE ? OR LOWER(c.description) LIKE ?)".to_string());
                params.extend([needle.clone(), needle]);
            }
        }
        if let Some(after) = &self.created_after {
            conditions.push("c.created_at >= ?".to_string());
            params.push(after.clone());
        }
        if let Some(before) = &self.created_before {
            conditions.push("c.created_at <= ?".to_string());
            params.push(before.clone());
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }

    fn from_clause(&self) -> &'static str {
        if self.joins_profiles() {
            " FROM complaints c LEFT JOIN profiles p ON p.user_id = c.owner_id"
        } else {
            " FROM complaints c"
        }
    }
}

/// Complaint repository
pub struct ComplaintRepo {
    conn: Arc<Mutex<Connection>>,
}

impl ComplaintRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComplaintEntity> {
        Ok(ComplaintEntity {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            category_id: row.get(2)?,
            subject: row.get(3)?,
            description: row.get(4)?,
            status: row.get(5)?,
            priority: row.get(6)?,
            admin_response: row.get(7)?,
            attachment_path: row.get(8)?,
            created_at: ts_column(row, 9)?,
            updated_at: ts_column(row, 10)?,
            resolved_at: opt_ts_column(row, 11)?,
        })
    }

    /// Insert a new complaint row
    pub fn insert(&self, entity: &ComplaintEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO complaints (id, owner_id, category_id, subject, description, status, \
             priority, admin_response, attachment_path, created_at, updated_at, resolved_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                entity.id,
                entity.owner_id,
                entity.category_id,
                entity.subject,
                entity.description,
                entity.status,
                entity.priority,
                entity.admin_response,
                entity.attachment_path,
                fmt_ts(&entity.created_at),
                fmt_ts(&entity.updated_at),
                entity.resolved_at.as_ref().map(fmt_ts),
            ],
        )
        .map_err(|e| DbError::Query(format!("Failed to insert complaint: {}", e)))?;
        Ok(())
    }

    /// Get one complaint by id
    pub fn get(&self, id: &str) -> DbResult<Option<ComplaintEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(
            &format!("SELECT {} FROM complaints c WHERE c.id = ?1", COLUMNS),
            params![id],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DbError::Query(format!("Failed to load complaint: {}", e)))
    }

    /// Overwrite every mutable field of an existing row
    pub fn update(&self, entity: &ComplaintEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "UPDATE complaints SET category_id = ?2, subject = ?3, description = ?4, \
                 status = ?5, priority = ?6, admin_response = ?7, attachment_path = ?8, \
                 updated_at = ?9, resolved_at = ?10 WHERE id = ?1",
                params![
                    entity.id,
                    entity.category_id,
                    entity.subject,
                    entity.description,
                    entity.status,
                    entity.priority,
                    entity.admin_response,
                    entity.attachment_path,
                    fmt_ts(&entity.updated_at),
                    entity.resolved_at.as_ref().map(fmt_ts),
                ],
            )
            .map_err(|e| DbError::Query(format!("Failed to update complaint: {}", e)))?;
        if affected == 0 {
            return Err(DbError::NotFound(format!(
                "{}: {}",
                ComplaintEntity::TABLE,
                entity.id
            )));
        }
        Ok(())
    }

    /// List rows matching the query, newest first
    pub fn list(&self, query: &ComplaintQuery, limit: u32, offset: u32) -> DbResult<Vec<ComplaintEntity>> {
        self.select(query, Some((limit, offset)))
    }

    /// All rows matching the query, newest first
    pub fn all(&self, query: &ComplaintQuery) -> DbResult<Vec<ComplaintEntity>> {
        self.select(query, None)
    }

    fn select(
        &self,
        query: &ComplaintQuery,
        page: Option<(u32, u32)>,
    ) -> DbResult<Vec<ComplaintEntity>> {
        let (where_sql, params) = query.where_clause();
        let mut sql = format!(
            "SELECT {}{}{} ORDER BY c.created_at DESC, c.id DESC",
            COLUMNS,
            query.from_clause(),
            where_sql
        );
        if let Some((limit, offset)) = page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }

        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DbError::Query(format!("Failed to prepare complaint query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query complaints: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read complaint row: {}", e)))?;
        Ok(rows)
    }

    /// Count rows matching the query
    pub fn count(&self, query: &ComplaintQuery) -> DbResult<u64> {
        let (where_sql, params) = query.where_clause();
        let sql = format!("SELECT COUNT(*){}{}", query.from_clause(), where_sql);

        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(&sql, params_from_iter(params.iter()), |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as u64)
        .map_err(|e| DbError::Query(format!("Failed to count complaints: {}", e)))
    }

    /// Number of complaints referencing a category
    pub fn count_for_category(&self, category_id: &str) -> DbResult<u64> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(
            "SELECT COUNT(*) FROM complaints WHERE category_id = ?1",
            params![category_id],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n as u64)
        .map_err(|e| DbError::Query(format!("Failed to count complaints: {}", e)))
    }

    /// The (id, status) pairs that exist out of the requested ids
    pub fn statuses_for_ids(&self, ids: &[String]) -> DbResult<Vec<(String, String)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, status FROM complaints WHERE id IN ({}) ORDER BY created_at DESC, id DESC",
            placeholders
        );

        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DbError::Query(format!("Failed to prepare status query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(ids.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| DbError::Query(format!("Failed to query statuses: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read status row: {}", e)))?;
        Ok(rows)
    }

    /// Apply the same status/priority change to every id in one statement.
    ///
    /// A status change into resolved stamps `resolved_at` only where it is
    /// still null, preserving the first resolution time.
    pub fn bulk_apply(
        &self,
        ids: &[String],
        status: Option<&str>,
        priority: Option<&str>,
        updated_at: &str,
    ) -> DbResult<usize> {
        if ids.is_empty() || (status.is_none() && priority.is_none()) {
            return Ok(0);
        }

        let mut sets = vec!["updated_at = ?".to_string()];
        let mut params: Vec<String> = vec![updated_at.to_string()];
        if let Some(status) = status {
            sets.push("status = ?".to_string());
            params.push(status.to_string());
            if status == "resolved" {
                sets.push("resolved_at = COALESCE(resolved_at, ?)".to_string());
                params.push(updated_at.to_string());
            }
        }
        if let Some(priority) = priority {
            sets.push("priority = ?".to_string());
            params.push(priority.to_string());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE complaints SET {} WHERE id IN ({})",
            sets.join(", "),
            placeholders
        );
        params.extend(ids.iter().cloned());

        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute(&sql, params_from_iter(params.iter()))
            .map_err(|e| DbError::Query(format!("Failed to bulk update complaints: {}", e)))
    }
}
