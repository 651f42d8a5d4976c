use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dogrun catalog row (local copy of a place)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dogrun {
    pub id: i64,
    pub place_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
