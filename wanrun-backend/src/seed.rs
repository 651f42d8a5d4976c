//! Demo data for local development
//!
//! Usage:
//!   cargo run -- seed-demo
//!
//! Creates one owner with two dogs, one dogrun, and a 30 day session, then
//! prints the bearer token so the interaction endpoints can be tried by hand.

use chrono::Duration;
use rusqlite::Result as SqliteResult;

use crate::db::Database;

const DEMO_SESSION_DAYS: i64 = 30;

pub struct DemoSeed {
    pub dog_owner_id: i64,
    pub dog_ids: Vec<i64>,
    pub dogrun_id: i64,
    pub token: String,
}

pub fn seed_demo(db: &Database) -> SqliteResult<DemoSeed> {
    let dog_owner_id = db.insert_dog_owner("demo owner")?;
    let dog_ids = vec![
        db.insert_dog(dog_owner_id, "Pochi", Some(8), Some("M"), None)?,
        db.insert_dog(dog_owner_id, "Momo", Some(5), Some("F"), None)?,
    ];
    let dogrun_id = db.insert_dogrun(
        "Yoyogi Park Dogrun",
        None,
        Some("2-1 Yoyogikamizonocho, Shibuya, Tokyo"),
        Some(35.6717),
        Some(139.6949),
    )?;
    let session = db.create_session(dog_owner_id, Duration::days(DEMO_SESSION_DAYS))?;

    log::info!(
        "[SEED] owner={} dogs={:?} dogrun={}",
        dog_owner_id,
        dog_ids,
        dogrun_id
    );

    Ok(DemoSeed {
        dog_owner_id,
        dog_ids,
        dogrun_id,
        token: session.token,
    })
}
