use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dog owner's saved interest in a dogrun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub dog_owner_id: i64,
    pub dogrun_id: i64,
    pub created_at: DateTime<Utc>,
}
