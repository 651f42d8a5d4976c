//! SQLite database - schema definitions and connection management
//!
//! This file contains:
//! - Database struct definition
//! - Connection management (new, init)
//! - Schema creation
//!
//! All table operations are in the tables/ subdirectory.

use chrono::{FixedOffset, NaiveDate, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::time::Duration;

/// Main database wrapper; a single connection guarded by a Mutex
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
    checkin_offset: FixedOffset,
}

impl Database {
    /// Create a new database connection and initialize schema
    pub fn new(database_url: &str, checkin_offset: FixedOffset) -> SqliteResult<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(database_url)?;
        let db = Self {
            conn: Mutex::new(conn),
            checkin_offset,
        };
        db.init()?;
        Ok(db)
    }

    /// Calendar day that check-ins are currently recorded against
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.checkin_offset).date_naive()
    }

    /// Initialize all database tables
    fn init(&self) -> SqliteResult<()> {
        let conn = self.conn.lock();

        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS dog_owners (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS dogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dog_owner_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                weight INTEGER,
                sex TEXT,
                image TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (dog_owner_id) REFERENCES dog_owners(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_dogs_owner ON dogs(dog_owner_id)",
            [],
        )?;

        // Local dogrun catalog (place details are fetched elsewhere)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dogruns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                place_id TEXT UNIQUE,
                name TEXT NOT NULL,
                address TEXT,
                latitude REAL,
                longitude REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // Bearer sessions
        conn.execute(
            "CREATE TABLE IF NOT EXISTS auth_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token TEXT UNIQUE NOT NULL,
                dog_owner_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                FOREIGN KEY (dog_owner_id) REFERENCES dog_owners(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // One bookmark per (owner, dogrun)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dogrun_bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dog_owner_id INTEGER NOT NULL,
                dogrun_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(dog_owner_id, dogrun_id),
                FOREIGN KEY (dog_owner_id) REFERENCES dog_owners(id) ON DELETE CASCADE,
                FOREIGN KEY (dogrun_id) REFERENCES dogruns(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // One check-in per (dogrun, dog, day)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS dogrun_checkins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dogrun_id INTEGER NOT NULL,
                dog_id INTEGER NOT NULL,
                checkin_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(dogrun_id, dog_id, checkin_date),
                FOREIGN KEY (dogrun_id) REFERENCES dogruns(id) ON DELETE CASCADE,
                FOREIGN KEY (dog_id) REFERENCES dogs(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_dogrun_checkins_date ON dogrun_checkins(dogrun_id, checkin_date)",
            [],
        )?;

        Ok(())
    }
}
