//! Dogrun catalog database operations

use chrono::Utc;
use rusqlite::{OptionalExtension, Result as SqliteResult, Row};
use std::collections::HashSet;

use crate::models::Dogrun;
use super::super::{parse_timestamp, placeholders, Database, IN_LIST_CHUNK};

impl Database {
    pub fn insert_dogrun(
        &self,
        name: &str,
        place_id: Option<&str>,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> SqliteResult<i64> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO dogruns (place_id, name, address, latitude, longitude, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            rusqlite::params![place_id, name, address, latitude, longitude, &now],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_dogrun(&self, id: i64) -> SqliteResult<Option<Dogrun>> {
        let conn = self.conn.lock();

        conn.query_row(
            "SELECT id, place_id, name, address, latitude, longitude, created_at, updated_at
             FROM dogruns WHERE id = ?1",
            [id],
            Self::row_to_dogrun,
        )
        .optional()
    }

    /// Ids from `ids` with no dogrun row, in input order
    pub fn find_missing_dogrun_ids(&self, ids: &[i64]) -> SqliteResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn.lock();
        let mut existing = HashSet::with_capacity(ids.len());

        for chunk in ids.chunks(IN_LIST_CHUNK) {
            let sql = format!(
                "SELECT id FROM dogruns WHERE id IN ({})",
                placeholders(1, chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(chunk.iter()), |row| row.get::<_, i64>(0))?;
            for id in rows {
                existing.insert(id?);
            }
        }

        Ok(ids.iter().copied().filter(|id| !existing.contains(id)).collect())
    }

    fn row_to_dogrun(row: &Row) -> SqliteResult<Dogrun> {
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        Ok(Dogrun {
            id: row.get(0)?,
            place_id: row.get(1)?,
            name: row.get(2)?,
            address: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            created_at: parse_timestamp(6, &created_at_str)?,
            updated_at: parse_timestamp(7, &updated_at_str)?,
        })
    }
}
