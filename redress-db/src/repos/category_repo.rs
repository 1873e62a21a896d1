//! Category repository

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use super::{fmt_ts, ts_column};
use crate::entities::{CategoryEntity, Entity};
use crate::error::{DbError, DbResult};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Category repository
pub struct CategoryRepo {
    conn: Arc<Mutex<Connection>>,
}

impl CategoryRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CategoryEntity> {
        Ok(CategoryEntity {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: ts_column(row, 3)?,
            updated_at: ts_column(row, 4)?,
        })
    }

    /// Insert a new category row; the UNIQUE index on name backstops the
    /// service-level duplicate check
    pub fn insert(&self, entity: &CategoryEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO categories (id, name, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entity.id,
                entity.name,
                entity.description,
                fmt_ts(&entity.created_at),
                fmt_ts(&entity.updated_at),
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DbError::AlreadyExists(format!("categories: {}", entity.name))
            }
            other => DbError::Query(format!("Failed to insert category: {}", other)),
        })?;
        Ok(())
    }

    /// Get one category by id
    pub fn get(&self, id: &str) -> DbResult<Option<CategoryEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(
            &format!("SELECT {} FROM categories WHERE id = ?1", COLUMNS),
            params![id],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DbError::Query(format!("Failed to load category: {}", e)))
    }

    /// Get one category by its unique name
    pub fn get_by_name(&self, name: &str) -> DbResult<Option<CategoryEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        conn.query_row(
            &format!("SELECT {} FROM categories WHERE name = ?1", COLUMNS),
            params![name],
            Self::map_row,
        )
        .optional()
        .map_err(|e| DbError::Query(format!("Failed to load category: {}", e)))
    }

    /// All categories ordered by name
    pub fn list(&self) -> DbResult<Vec<CategoryEntity>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM categories ORDER BY name", COLUMNS))
            .map_err(|e| DbError::Query(format!("Failed to prepare category query: {}", e)))?;
        let rows = stmt
            .query_map([], Self::map_row)
            .map_err(|e| DbError::Query(format!("Failed to query categories: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read category row: {}", e)))?;
        Ok(rows)
    }

    /// Overwrite name/description of an existing row
    pub fn update(&self, entity: &CategoryEntity) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "UPDATE categories SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1",
                params![
                    entity.id,
                    entity.name,
                    entity.description,
                    fmt_ts(&entity.updated_at),
                ],
            )
            .map_err(|e| DbError::Query(format!("Failed to update category: {}", e)))?;
        if affected == 0 {
            return Err(DbError::NotFound(format!(
                "{}: {}",
                CategoryEntity::TABLE,
                entity.id
            )));
        }
        Ok(())
    }

    /// Delete one category row
    pub fn delete(&self, id: &str) -> DbResult<()> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])
            .map_err(|e| DbError::Query(format!("Failed to delete category: {}", e)))?;
        if affected == 0 {
            return Err(DbError::NotFound(format!(
                "{}: {}",
                CategoryEntity::TABLE,
                id
            )));
        }
        Ok(())
    }
}
