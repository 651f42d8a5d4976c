use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A dog's presence at a dogrun on one calendar day.
///
/// `id` and the timestamps are `None` until the row has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogrunCheckin {
    pub id: Option<i64>,
    pub dogrun_id: i64,
    pub dog_id: i64,
    pub checkin_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DogrunCheckin {
    /// Unsaved check-in for `dogrun_id`, `dog_id` on `day`
    pub fn new(dogrun_id: i64, dog_id: i64, day: NaiveDate) -> Self {
        Self {
            id: None,
            dogrun_id,
            dog_id,
            checkin_date: Some(day),
            created_at: None,
            updated_at: None,
        }
    }
}
