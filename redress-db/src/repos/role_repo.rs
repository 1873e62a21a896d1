//! Role assignment repository

use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

use super::fmt_ts;
use crate::entities::RoleEntity;
use crate::error::{DbError, DbResult};

pub struct RoleRepo {
    conn: Arc<Mutex<Connection>>,
}

impl RoleRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Grant a role. Granting a role the user already holds changes nothing.
    pub fn grant(&self, entity: &RoleEntity) -> DbResult<bool> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "INSERT OR IGNORE INTO role_assignments (user_id, role, granted_by, created_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entity.user_id,
                    entity.role,
                    entity.granted_by,
                    fmt_ts(&entity.created_at),
                ],
            )
            .map_err(|e| DbError::Query(format!("Failed to grant role: {}", e)))?;
        Ok(affected > 0)
    }

    /// Revoke a role. Revoking a role the user does not hold changes nothing.
    pub fn revoke(&self, user_id: &str, role: &str) -> DbResult<bool> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let affected = conn
            .execute(
                "DELETE FROM role_assignments WHERE user_id = ?1 AND role = ?2",
                params![user_id, role],
            )
            .map_err(|e| DbError::Query(format!("Failed to revoke role: {}", e)))?;
        Ok(affected > 0)
    }

    /// All role names held by one user
    pub fn roles_for(&self, user_id: &str) -> DbResult<Vec<String>> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        let mut stmt = conn
            .prepare("SELECT role FROM role_assignments WHERE user_id = ?1 ORDER BY role ASC")
            .map_err(|e| DbError::Query(format!("Failed to prepare role query: {}", e)))?;
        let rows = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::Query(format!("Failed to query roles: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("Failed to read role row: {}", e)))?;
        Ok(rows)
    }
}
