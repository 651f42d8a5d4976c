//! Interaction subsystem: dogrun bookmarks and daily dog check-ins
//!
//! The managers orchestrate validation through the facades and persistence
//! through the repository ports below. Neither manager holds records past a
//! single call, and neither does any locking of its own; uniqueness is
//! enforced by the storage layer.

mod bookmark;
mod checkin;
#[cfg(test)]
pub(crate) mod memory;

pub use bookmark::{duplicate_bookmark_error, BookmarkManager};
pub use checkin::CheckinManager;

use chrono::NaiveDate;

use crate::errors::WrError;
use crate::models::{Bookmark, DogrunCheckin};

/// Storage for bookmark rows
pub trait BookmarkRepository: Send + Sync {
    /// Bookmark of `dog_owner_id` on `dogrun_id`, if any
    fn find_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<Option<Bookmark>, WrError>;

    /// Insert a bookmark and return its id.
    ///
    /// Fails with the duplicate-bookmark client error when the pair is
    /// already stored, even if a concurrent call won the race.
    fn insert_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<i64, WrError>;

    /// Delete every bookmark of the owner on the given dogruns; returns rows removed
    fn delete_bookmarks(&self, dog_owner_id: i64, dogrun_ids: &[i64]) -> Result<usize, WrError>;

    fn list_bookmarks(&self, dog_owner_id: i64) -> Result<Vec<Bookmark>, WrError>;
}

/// Storage for check-in rows, keyed by calendar day
pub trait CheckinRepository: Send + Sync {
    /// The day new check-ins are recorded against right now
    fn checkin_day(&self) -> NaiveDate;

    fn find_checkin(&self, dogrun_id: i64, dog_id: i64, day: NaiveDate) -> Result<Option<DogrunCheckin>, WrError>;

    /// Insert new records and touch existing ones in one atomic write.
    /// Returns the stored rows in input order.
    fn upsert_checkins(&self, records: &[DogrunCheckin]) -> Result<Vec<DogrunCheckin>, WrError>;
}

/// Reject an empty id list or one that repeats an id
pub(crate) fn require_distinct_ids(ids: &[i64], field: &str) -> Result<(), WrError> {
    if ids.is_empty() {
        return Err(WrError::interaction_client(format!("{} must not be empty", field)));
    }

    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(WrError::interaction_client(format!(
            "{} contains duplicate id {}",
            field, dup
        )));
    }

    Ok(())
}
