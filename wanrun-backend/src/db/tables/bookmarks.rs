//! Dogrun bookmark database operations

use chrono::Utc;
use rusqlite::{OptionalExtension, Result as SqliteResult, Row};

use crate::errors::WrError;
use crate::interaction::{duplicate_bookmark_error, BookmarkRepository};
use crate::models::Bookmark;
use super::super::{parse_timestamp, placeholders, Database, IN_LIST_CHUNK};

/// Outcome of a raw insert
pub(crate) enum InsertBookmark {
    Created(i64),
    AlreadyExists,
}

impl Database {
    pub fn get_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> SqliteResult<Option<Bookmark>> {
        let conn = self.conn.lock();

        conn.query_row(
            "SELECT id, dog_owner_id, dogrun_id, created_at FROM dogrun_bookmarks
             WHERE dog_owner_id = ?1 AND dogrun_id = ?2",
            [dog_owner_id, dogrun_id],
            Self::row_to_bookmark,
        )
        .optional()
    }

    /// Insert a bookmark; a UNIQUE(dog_owner_id, dogrun_id) hit is reported, not raised
    pub(crate) fn create_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> SqliteResult<InsertBookmark> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        let result = conn.execute(
            "INSERT INTO dogrun_bookmarks (dog_owner_id, dogrun_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![dog_owner_id, dogrun_id, &now],
        );

        match result {
            Ok(_) => Ok(InsertBookmark::Created(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Ok(InsertBookmark::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove_bookmarks(&self, dog_owner_id: i64, dogrun_ids: &[i64]) -> SqliteResult<usize> {
        if dogrun_ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let mut removed = 0;

        for chunk in dogrun_ids.chunks(IN_LIST_CHUNK) {
            let sql = format!(
                "DELETE FROM dogrun_bookmarks WHERE dog_owner_id = ?1 AND dogrun_id IN ({})",
                placeholders(2, chunk.len())
            );
            let params = std::iter::once(dog_owner_id).chain(chunk.iter().copied());
            removed += tx.execute(&sql, rusqlite::params_from_iter(params))?;
        }

        tx.commit()?;
        Ok(removed)
    }

    pub fn get_bookmarks_by_owner(&self, dog_owner_id: i64) -> SqliteResult<Vec<Bookmark>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, dog_owner_id, dogrun_id, created_at FROM dogrun_bookmarks
             WHERE dog_owner_id = ?1 ORDER BY id",
        )?;

        let bookmarks = stmt
            .query_map([dog_owner_id], Self::row_to_bookmark)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(bookmarks)
    }

    fn row_to_bookmark(row: &Row) -> SqliteResult<Bookmark> {
        let created_at_str: String = row.get(3)?;
        Ok(Bookmark {
            id: row.get(0)?,
            dog_owner_id: row.get(1)?,
            dogrun_id: row.get(2)?,
            created_at: parse_timestamp(3, &created_at_str)?,
        })
    }
}

impl BookmarkRepository for Database {
    fn find_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<Option<Bookmark>, WrError> {
        self.get_bookmark(dog_owner_id, dogrun_id).map_err(|e| {
            WrError::interaction_server("Failed to look up bookmark").with_source(e)
        })
    }

    fn insert_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<i64, WrError> {
        match self.create_bookmark(dog_owner_id, dogrun_id) {
            Ok(InsertBookmark::Created(id)) => Ok(id),
            Ok(InsertBookmark::AlreadyExists) => Err(duplicate_bookmark_error(dogrun_id)),
            Err(e) => Err(WrError::interaction_server("Failed to save bookmark").with_source(e)),
        }
    }

    fn delete_bookmarks(&self, dog_owner_id: i64, dogrun_ids: &[i64]) -> Result<usize, WrError> {
        self.remove_bookmarks(dog_owner_id, dogrun_ids).map_err(|e| {
            WrError::interaction_server("Failed to delete bookmarks").with_source(e)
        })
    }

    fn list_bookmarks(&self, dog_owner_id: i64) -> Result<Vec<Bookmark>, WrError> {
        self.get_bookmarks_by_owner(dog_owner_id).map_err(|e| {
            WrError::interaction_server("Failed to list bookmarks").with_source(e)
        })
    }
}
