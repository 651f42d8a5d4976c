//! Validation ports the interaction managers consume
//!
//! Each facade answers one question about entities owned by another part of
//! the service. Production implementations read the shared database.

mod dog;
mod dogrun;

pub use dog::DbDogFacade;
pub use dogrun::DbDogrunFacade;

use crate::errors::WrError;

pub trait DogrunFacade: Send + Sync {
    /// Ok when every id names an existing dogrun; a dogrun client error
    /// listing the missing ids otherwise
    fn check_dogruns_exist(&self, dogrun_ids: &[i64]) -> Result<(), WrError>;
}

pub trait DogFacade: Send + Sync {
    /// Ok when every dog exists and belongs to `dog_owner_id`
    fn check_dogs_owned_by(&self, dog_owner_id: i64, dog_ids: &[i64]) -> Result<(), WrError>;
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

pub(crate) fn missing_dogruns_error(missing: &[i64]) -> WrError {
    WrError::dogrun_client(format!("Dogrun not found: {}", join_ids(missing)))
}

pub(crate) fn unowned_dogs_error(unowned: &[i64]) -> WrError {
    WrError::dog_client(format!("Dog is not owned by the caller: {}", join_ids(unowned)))
}
