//! In-memory ports for manager tests

use chrono::{Days, NaiveDate, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{duplicate_bookmark_error, BookmarkRepository, CheckinRepository};
use crate::errors::WrError;
use crate::facades::{missing_dogruns_error, unowned_dogs_error, DogFacade, DogrunFacade};
use crate::models::{Bookmark, DogrunCheckin};

#[derive(Default)]
struct State {
    next_id: i64,
    bookmarks: Vec<Bookmark>,
    checkins: Vec<DogrunCheckin>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Bookmark and check-in storage with the same uniqueness rules as the
/// SQLite tables
pub struct InMemoryInteractionStore {
    state: Mutex<State>,
    today: Mutex<NaiveDate>,
    fail_writes: AtomicBool,
    advance_before_write: AtomicBool,
    upsert_calls: AtomicUsize,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            today: Mutex::new(Utc::now().date_naive()),
            fail_writes: AtomicBool::new(false),
            advance_before_write: AtomicBool::new(false),
            upsert_calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn advance_day(&self) {
        let mut today = self.today.lock();
        *today = *today + Days::new(1);
    }

    /// Roll the day over once, just before the next check-in write lands
    pub fn advance_day_before_next_write(&self) {
        self.advance_before_write.store(true, Ordering::SeqCst);
    }

    pub fn checkin_count(&self) -> usize {
        self.state.lock().checkins.len()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), WrError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(WrError::interaction_server("store unavailable"))
        } else {
            Ok(())
        }
    }
}

impl BookmarkRepository for InMemoryInteractionStore {
    fn find_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<Option<Bookmark>, WrError> {
        let state = self.state.lock();
        Ok(state
            .bookmarks
            .iter()
            .find(|b| b.dog_owner_id == dog_owner_id && b.dogrun_id == dogrun_id)
            .cloned())
    }

    fn insert_bookmark(&self, dog_owner_id: i64, dogrun_id: i64) -> Result<i64, WrError> {
        self.check_writable()?;
        let mut state = self.state.lock();

        if state
            .bookmarks
            .iter()
            .any(|b| b.dog_owner_id == dog_owner_id && b.dogrun_id == dogrun_id)
        {
            return Err(duplicate_bookmark_error(dogrun_id));
        }

        let id = state.next_id();
        state.bookmarks.push(Bookmark {
            id,
            dog_owner_id,
            dogrun_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn delete_bookmarks(&self, dog_owner_id: i64, dogrun_ids: &[i64]) -> Result<usize, WrError> {
        self.check_writable()?;
        let mut state = self.state.lock();
        let before = state.bookmarks.len();
        state
            .bookmarks
            .retain(|b| !(b.dog_owner_id == dog_owner_id && dogrun_ids.contains(&b.dogrun_id)));
        Ok(before - state.bookmarks.len())
    }

    fn list_bookmarks(&self, dog_owner_id: i64) -> Result<Vec<Bookmark>, WrError> {
        let state = self.state.lock();
        Ok(state
            .bookmarks
            .iter()
            .filter(|b| b.dog_owner_id == dog_owner_id)
            .cloned()
            .collect())
    }
}

impl CheckinRepository for InMemoryInteractionStore {
    fn checkin_day(&self) -> NaiveDate {
        *self.today.lock()
    }

    fn find_checkin(&self, dogrun_id: i64, dog_id: i64, day: NaiveDate) -> Result<Option<DogrunCheckin>, WrError> {
        let state = self.state.lock();
        Ok(state
            .checkins
            .iter()
            .find(|c| c.dogrun_id == dogrun_id && c.dog_id == dog_id && c.checkin_date == Some(day))
            .cloned())
    }

    fn upsert_checkins(&self, records: &[DogrunCheckin]) -> Result<Vec<DogrunCheckin>, WrError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        if self.advance_before_write.swap(false, Ordering::SeqCst) {
            self.advance_day();
        }

        let today = *self.today.lock();
        let now = Utc::now();
        let mut state = self.state.lock();
        let mut saved = Vec::with_capacity(records.len());

        for record in records {
            let date = record.checkin_date.unwrap_or(today);
            let existing = state.checkins.iter().position(|c| match record.id {
                Some(id) => c.id == Some(id),
                None => c.dogrun_id == record.dogrun_id && c.dog_id == record.dog_id && c.checkin_date == Some(date),
            });

            match existing {
                Some(idx) => {
                    state.checkins[idx].updated_at = Some(now);
                    saved.push(state.checkins[idx].clone());
                }
                None => {
                    let stored = DogrunCheckin {
                        id: Some(state.next_id()),
                        dogrun_id: record.dogrun_id,
                        dog_id: record.dog_id,
                        checkin_date: Some(date),
                        created_at: Some(now),
                        updated_at: Some(now),
                    };
                    state.checkins.push(stored.clone());
                    saved.push(stored);
                }
            }
        }

        Ok(saved)
    }
}

pub struct InMemoryDogruns {
    ids: HashSet<i64>,
}

impl InMemoryDogruns {
    pub fn new(ids: &[i64]) -> Self {
        Self {
            ids: ids.iter().copied().collect(),
        }
    }
}

impl DogrunFacade for InMemoryDogruns {
    fn check_dogruns_exist(&self, dogrun_ids: &[i64]) -> Result<(), WrError> {
        let missing: Vec<i64> = dogrun_ids.iter().copied().filter(|id| !self.ids.contains(id)).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing_dogruns_error(&missing))
        }
    }
}

/// dog id -> owner id
pub struct InMemoryDogs {
    owners: HashMap<i64, i64>,
}

impl InMemoryDogs {
    pub fn new(owners: &[(i64, i64)]) -> Self {
        Self {
            owners: owners.iter().copied().collect(),
        }
    }
}

impl DogFacade for InMemoryDogs {
    fn check_dogs_owned_by(&self, dog_owner_id: i64, dog_ids: &[i64]) -> Result<(), WrError> {
        let unowned: Vec<i64> = dog_ids
            .iter()
            .copied()
            .filter(|id| self.owners.get(id) != Some(&dog_owner_id))
            .collect();
        if unowned.is_empty() {
            Ok(())
        } else {
            Err(unowned_dogs_error(&unowned))
        }
    }
}
