//! Dog and dog owner database operations

use chrono::Utc;
use rusqlite::{OptionalExtension, Result as SqliteResult, Row};
use std::collections::HashMap;

use crate::models::{Dog, DogOwner};
use super::super::{parse_timestamp, placeholders, Database, IN_LIST_CHUNK};

const DOG_COLUMNS: &str = "id, dog_owner_id, name, weight, sex, image, created_at, updated_at";

impl Database {
    pub fn insert_dog_owner(&self, name: &str) -> SqliteResult<i64> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO dog_owners (name, created_at) VALUES (?1, ?2)",
            rusqlite::params![name, &now],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_dog_owner(&self, id: i64) -> SqliteResult<Option<DogOwner>> {
        let conn = self.conn.lock();

        conn.query_row(
            "SELECT id, name, created_at FROM dog_owners WHERE id = ?1",
            [id],
            |row| {
                let created_at_str: String = row.get(2)?;
                Ok(DogOwner {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: parse_timestamp(2, &created_at_str)?,
                })
            },
        )
        .optional()
    }

    pub fn insert_dog(
        &self,
        dog_owner_id: i64,
        name: &str,
        weight: Option<i64>,
        sex: Option<&str>,
        image: Option<&str>,
    ) -> SqliteResult<i64> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO dogs (dog_owner_id, name, weight, sex, image, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            rusqlite::params![dog_owner_id, name, weight, sex, image, &now],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_dog(&self, id: i64) -> SqliteResult<Option<Dog>> {
        let conn = self.conn.lock();

        conn.query_row(
            &format!("SELECT {} FROM dogs WHERE id = ?1", DOG_COLUMNS),
            [id],
            Self::row_to_dog,
        )
        .optional()
    }

    pub fn list_dogs_by_owner(&self, dog_owner_id: i64) -> SqliteResult<Vec<Dog>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM dogs WHERE dog_owner_id = ?1 ORDER BY id",
            DOG_COLUMNS
        ))?;

        let dogs = stmt
            .query_map([dog_owner_id], Self::row_to_dog)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(dogs)
    }

    /// Owner of each dog in `dog_ids` that exists
    pub fn get_dog_owner_ids(&self, dog_ids: &[i64]) -> SqliteResult<HashMap<i64, i64>> {
        if dog_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conn = self.conn.lock();
        let mut owners = HashMap::with_capacity(dog_ids.len());

        for chunk in dog_ids.chunks(IN_LIST_CHUNK) {
            let sql = format!(
                "SELECT id, dog_owner_id FROM dogs WHERE id IN ({})",
                placeholders(1, chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (dog_id, owner_id) = row?;
                owners.insert(dog_id, owner_id);
            }
        }

        Ok(owners)
    }

    fn row_to_dog(row: &Row) -> SqliteResult<Dog> {
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        Ok(Dog {
            id: row.get(0)?,
            dog_owner_id: row.get(1)?,
            name: row.get(2)?,
            weight: row.get(3)?,
            sex: row.get(4)?,
            image: row.get(5)?,
            created_at: parse_timestamp(6, &created_at_str)?,
            updated_at: parse_timestamp(7, &updated_at_str)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_db;

    #[test]
    fn test_dog_owner_lookup() {
        let (_dir, db) = temp_db();
        let hana = db.insert_dog_owner("hana").unwrap();
        let kai = db.insert_dog_owner("kai").unwrap();
        let pochi = db.insert_dog(hana, "Pochi", Some(8), Some("M"), None).unwrap();
        let momo = db.insert_dog(kai, "Momo", None, None, None).unwrap();

        let owners = db.get_dog_owner_ids(&[pochi, momo, 999]).unwrap();
        assert_eq!(owners.get(&pochi), Some(&hana));
        assert_eq!(owners.get(&momo), Some(&kai));
        assert!(!owners.contains_key(&999));
    }

    #[test]
    fn test_dog_owner_lookup_over_many_ids() {
        let (_dir, db) = temp_db();
        let hana = db.insert_dog_owner("hana").unwrap();
        let pochi = db.insert_dog(hana, "Pochi", None, None, None).unwrap();

        let mut ids: Vec<i64> = (1_000..41_000).collect();
        ids.push(pochi);

        let owners = db.get_dog_owner_ids(&ids).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners.get(&pochi), Some(&hana));
    }

    #[test]
    fn test_list_dogs_by_owner() {
        let (_dir, db) = temp_db();
        let hana = db.insert_dog_owner("hana").unwrap();
        db.insert_dog(hana, "Pochi", Some(8), Some("M"), None).unwrap();
        db.insert_dog(hana, "Hachi", Some(20), Some("M"), Some("hachi.png")).unwrap();

        let names: Vec<String> = db.list_dogs_by_owner(hana).unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Pochi", "Hachi"]);
        assert_eq!(db.get_dog_owner(hana).unwrap().unwrap().name, "hana");
        assert!(db.get_dog_owner(hana + 1).unwrap().is_none());
    }
}
