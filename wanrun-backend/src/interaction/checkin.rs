use std::sync::Arc;

use super::{require_distinct_ids, CheckinRepository};
use crate::errors::WrError;
use crate::facades::{DogFacade, DogrunFacade};
use crate::identity::AccountClaims;
use crate::models::DogrunCheckin;

/// Records the caller's dogs as present at a dogrun today
pub struct CheckinManager {
    repo: Arc<dyn CheckinRepository>,
    dogruns: Arc<dyn DogrunFacade>,
    dogs: Arc<dyn DogFacade>,
}

impl CheckinManager {
    pub fn new(
        repo: Arc<dyn CheckinRepository>,
        dogruns: Arc<dyn DogrunFacade>,
        dogs: Arc<dyn DogFacade>,
    ) -> Self {
        Self { repo, dogruns, dogs }
    }

    /// Check `dog_ids` in at `dogrun_id` for today.
    ///
    /// The dogrun must exist and every dog must belong to the caller, or
    /// nothing is written. Dogs already checked in today keep their
    /// existing record, so repeating the call never adds rows.
    pub fn checkin_dogrun(
        &self,
        claims: &AccountClaims,
        dogrun_id: i64,
        dog_ids: &[i64],
    ) -> Result<Vec<DogrunCheckin>, WrError> {
        log::info!(
            "[CHECKIN] Owner {} checking dogs {:?} in at dogrun {}",
            claims.dog_owner_id,
            dog_ids,
            dogrun_id
        );

        require_distinct_ids(dog_ids, "dogIDs")?;
        self.dogruns.check_dogruns_exist(&[dogrun_id])?;
        self.dogs.check_dogs_owned_by(claims.dog_owner_id, dog_ids)?;

        // One day for the whole batch, even if the clock passes midnight mid-call
        let day = self.repo.checkin_day();
        let mut records = Vec::with_capacity(dog_ids.len());
        for &dog_id in dog_ids {
            match self.repo.find_checkin(dogrun_id, dog_id, day)? {
                Some(existing) => records.push(existing),
                None => {
                    log::info!("[CHECKIN] First check-in on {} for dog {} at dogrun {}", day, dog_id, dogrun_id);
                    records.push(DogrunCheckin::new(dogrun_id, dog_id, day));
                }
            }
        }

        self.repo.upsert_checkins(&records)
    }
}
