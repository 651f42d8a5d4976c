use std::sync::Arc;

use super::{missing_dogruns_error, DogrunFacade};
use crate::db::Database;
use crate::errors::WrError;

pub struct DbDogrunFacade {
    db: Arc<Database>,
}

impl DbDogrunFacade {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl DogrunFacade for DbDogrunFacade {
    fn check_dogruns_exist(&self, dogrun_ids: &[i64]) -> Result<(), WrError> {
        let missing = self
            .db
            .find_missing_dogrun_ids(dogrun_ids)
            .map_err(|e| WrError::dogrun_server("Failed to look up dogruns").with_source(e))?;

        if missing.is_empty() {
            Ok(())
        } else {
            log::warn!("[DOGRUN] Unknown dogrun ids requested: {:?}", missing);
            Err(missing_dogruns_error(&missing))
        }
    }
}
