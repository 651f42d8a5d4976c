use std::sync::Arc;

use super::{unowned_dogs_error, DogFacade};
use crate::db::Database;
use crate::errors::WrError;

pub struct DbDogFacade {
    db: Arc<Database>,
}

impl DbDogFacade {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl DogFacade for DbDogFacade {
    fn check_dogs_owned_by(&self, dog_owner_id: i64, dog_ids: &[i64]) -> Result<(), WrError> {
        let owners = self
            .db
            .get_dog_owner_ids(dog_ids)
            .map_err(|e| WrError::dog_server("Failed to look up dogs").with_source(e))?;

        // Unknown dogs count as not owned
        let unowned: Vec<i64> = dog_ids
            .iter()
            .copied()
            .filter(|id| owners.get(id) != Some(&dog_owner_id))
            .collect();

        if unowned.is_empty() {
            Ok(())
        } else {
            log::warn!(
                "[DOG] Owner {} referenced dogs it does not own: {:?}",
                dog_owner_id,
                unowned
            );
            Err(unowned_dogs_error(&unowned))
        }
    }
}
