//! Auth session database operations

use chrono::{Duration, Utc};
use rusqlite::{OptionalExtension, Result as SqliteResult};
use uuid::Uuid;

use crate::models::Session;
use super::super::{parse_timestamp, Database};

impl Database {
    /// Issue a new bearer session for a dog owner
    pub fn create_session(&self, dog_owner_id: i64, ttl: Duration) -> SqliteResult<Session> {
        let conn = self.conn.lock();
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let expires_at = now + ttl;

        conn.execute(
            "INSERT INTO auth_sessions (token, dog_owner_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![&token, dog_owner_id, now.to_rfc3339(), expires_at.to_rfc3339()],
        )?;

        Ok(Session {
            id: conn.last_insert_rowid(),
            token,
            dog_owner_id,
            created_at: now,
            expires_at,
        })
    }

    pub fn get_session(&self, token: &str) -> SqliteResult<Option<Session>> {
        let conn = self.conn.lock();

        conn.query_row(
            "SELECT id, token, dog_owner_id, created_at, expires_at FROM auth_sessions WHERE token = ?1",
            [token],
            |row| {
                let created_at_str: String = row.get(3)?;
                let expires_at_str: String = row.get(4)?;
                Ok(Session {
                    id: row.get(0)?,
                    token: row.get(1)?,
                    dog_owner_id: row.get(2)?,
                    created_at: parse_timestamp(3, &created_at_str)?,
                    expires_at: parse_timestamp(4, &expires_at_str)?,
                })
            },
        )
        .optional()
    }

    pub fn delete_session(&self, token: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock();
        let rows_affected = conn.execute("DELETE FROM auth_sessions WHERE token = ?1", [token])?;
        Ok(rows_affected > 0)
    }
}
