use std::sync::Arc;

use super::{require_distinct_ids, BookmarkRepository};
use crate::errors::WrError;
use crate::facades::DogrunFacade;
use crate::identity::AccountClaims;
use crate::models::Bookmark;

pub fn duplicate_bookmark_error(dogrun_id: i64) -> WrError {
    WrError::interaction_client(format!("Dogrun {} is already bookmarked", dogrun_id))
}

/// Adds and removes dogrun bookmarks for the calling owner
pub struct BookmarkManager {
    repo: Arc<dyn BookmarkRepository>,
    dogruns: Arc<dyn DogrunFacade>,
}

impl BookmarkManager {
    pub fn new(repo: Arc<dyn BookmarkRepository>, dogruns: Arc<dyn DogrunFacade>) -> Self {
        Self { repo, dogruns }
    }

    /// Bookmark every dogrun in `dogrun_ids`, in order, returning the new ids.
    ///
    /// All dogruns must exist before anything is written. A dogrun that is
    /// already bookmarked stops the call, and bookmarks created earlier in
    /// the same call are kept.
    pub fn add_bookmarks(&self, claims: &AccountClaims, dogrun_ids: &[i64]) -> Result<Vec<i64>, WrError> {
        let owner_id = claims.dog_owner_id;
        log::info!("[BOOKMARK] Owner {} adding dogruns {:?}", owner_id, dogrun_ids);

        require_distinct_ids(dogrun_ids, "dogrunIDs")?;
        self.dogruns.check_dogruns_exist(dogrun_ids)?;

        let mut bookmark_ids = Vec::with_capacity(dogrun_ids.len());
        for &dogrun_id in dogrun_ids {
            if self.repo.find_bookmark(owner_id, dogrun_id)?.is_some() {
                log::warn!(
                    "[BOOKMARK] Owner {} already bookmarked dogrun {} ({} created before stopping)",
                    owner_id,
                    dogrun_id,
                    bookmark_ids.len()
                );
                return Err(duplicate_bookmark_error(dogrun_id));
            }
            bookmark_ids.push(self.repo.insert_bookmark(owner_id, dogrun_id)?);
        }

        Ok(bookmark_ids)
    }

    /// Remove the owner's bookmarks on `dogrun_ids`; ids not bookmarked are ignored
    pub fn delete_bookmarks(&self, claims: &AccountClaims, dogrun_ids: &[i64]) -> Result<(), WrError> {
        log::info!(
            "[BOOKMARK] Owner {} removing dogruns {:?}",
            claims.dog_owner_id,
            dogrun_ids
        );

        let removed = self.repo.delete_bookmarks(claims.dog_owner_id, dogrun_ids)?;
        log::debug!("[BOOKMARK] Removed {} bookmark(s)", removed);
        Ok(())
    }

    pub fn list_bookmarks(&self, claims: &AccountClaims) -> Result<Vec<Bookmark>, WrError> {
        self.repo.list_bookmarks(claims.dog_owner_id)
    }
}
