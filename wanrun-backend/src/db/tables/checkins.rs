//! Dogrun check-in database operations

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension, Result as SqliteResult, Row};

use crate::errors::WrError;
use crate::interaction::CheckinRepository;
use crate::models::DogrunCheckin;
use super::super::{parse_date, parse_timestamp, Database, DATE_FORMAT};

const CHECKIN_COLUMNS: &str = "id, dogrun_id, dog_id, checkin_date, created_at, updated_at";

impl Database {
    pub fn get_checkin_on(&self, dogrun_id: i64, dog_id: i64, date: NaiveDate) -> SqliteResult<Option<DogrunCheckin>> {
        let conn = self.conn.lock();
        let date_str = date.format(DATE_FORMAT).to_string();

        conn.query_row(
            &format!(
                "SELECT {} FROM dogrun_checkins WHERE dogrun_id = ?1 AND dog_id = ?2 AND checkin_date = ?3",
                CHECKIN_COLUMNS
            ),
            rusqlite::params![dogrun_id, dog_id, &date_str],
            Self::row_to_checkin,
        )
        .optional()
    }

    /// Check-ins recorded at a dogrun on one day, oldest first
    pub fn list_checkins_on(&self, dogrun_id: i64, date: NaiveDate) -> SqliteResult<Vec<DogrunCheckin>> {
        let conn = self.conn.lock();
        let date_str = date.format(DATE_FORMAT).to_string();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM dogrun_checkins WHERE dogrun_id = ?1 AND checkin_date = ?2 ORDER BY id",
            CHECKIN_COLUMNS
        ))?;

        let checkins = stmt
            .query_map(rusqlite::params![dogrun_id, &date_str], Self::row_to_checkin)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(checkins)
    }

    /// Write all records in one transaction.
    ///
    /// Stored records are touched by id. New records are inserted; if another
    /// writer already created the same (dogrun, dog, day) row, that row is
    /// touched instead, so the key never gets a second row.
    pub fn save_checkins(&self, records: &[DogrunCheckin], today: NaiveDate) -> SqliteResult<Vec<DogrunCheckin>> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        let mut saved = Vec::with_capacity(records.len());

        for record in records {
            if let Some(id) = record.id {
                let touched = tx
                    .query_row(
                        &format!(
                            "UPDATE dogrun_checkins SET updated_at = ?1 WHERE id = ?2 RETURNING {}",
                            CHECKIN_COLUMNS
                        ),
                        rusqlite::params![&now, id],
                        Self::row_to_checkin,
                    )
                    .optional()?;

                if let Some(row) = touched {
                    saved.push(row);
                    continue;
                }
            }

            let date_str = record
                .checkin_date
                .unwrap_or(today)
                .format(DATE_FORMAT)
                .to_string();

            let row = tx.query_row(
                &format!(
                    "INSERT INTO dogrun_checkins (dogrun_id, dog_id, checkin_date, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)
                     ON CONFLICT(dogrun_id, dog_id, checkin_date) DO UPDATE SET updated_at = excluded.updated_at
                     RETURNING {}",
                    CHECKIN_COLUMNS
                ),
                rusqlite::params![record.dogrun_id, record.dog_id, &date_str, &now],
                Self::row_to_checkin,
            )?;
            saved.push(row);
        }

        tx.commit()?;
        Ok(saved)
    }

    fn row_to_checkin(row: &Row) -> SqliteResult<DogrunCheckin> {
        let date_str: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        Ok(DogrunCheckin {
            id: Some(row.get(0)?),
            dogrun_id: row.get(1)?,
            dog_id: row.get(2)?,
            checkin_date: Some(parse_date(3, &date_str)?),
            created_at: Some(parse_timestamp(4, &created_at_str)?),
            updated_at: Some(parse_timestamp(5, &updated_at_str)?),
        })
    }
}

impl CheckinRepository for Database {
    fn checkin_day(&self) -> NaiveDate {
        self.today()
    }

    fn find_checkin(&self, dogrun_id: i64, dog_id: i64, day: NaiveDate) -> Result<Option<DogrunCheckin>, WrError> {
        self.get_checkin_on(dogrun_id, dog_id, day).map_err(|e| {
            WrError::interaction_server("Failed to look up check-in").with_source(e)
        })
    }

    fn upsert_checkins(&self, records: &[DogrunCheckin]) -> Result<Vec<DogrunCheckin>, WrError> {
        self.save_checkins(records, self.today()).map_err(|e| {
            WrError::interaction_server("Failed to save check-ins").with_source(e)
        })
    }
}
