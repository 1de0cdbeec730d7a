use super::{lock, RaceStore};
use crate::{error::SimResult, record::StoredRace};
use std::sync::Mutex;

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    races: Mutex<Vec<StoredRace>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RaceStore for MemoryStore {
    fn backend(&self) -> &'static str { "memory" }

    fn append(&self, race: &StoredRace) -> SimResult<()> {
        lock(&self.races).push(race.clone());
        Ok(())
    }

    fn list_all(&self) -> SimResult<Vec<StoredRace>> {
        Ok(lock(&self.races).clone())
    }

    fn find_by_id(&self, id: &str) -> SimResult<Option<StoredRace>> {
        Ok(lock(&self.races).iter().find(|r| r.id == id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> SimResult<bool> {
        let mut races = lock(&self.races);
        let before = races.len();
        races.retain(|r| r.id != id);
        Ok(races.len() != before)
    }
}
