//! Single-file JSON store.
//!
//! The whole collection lives in one JSON array. Every write reads the
//! full array, modifies it in memory, and overwrites the file. The mutex
//! only serializes writers inside this process; two processes sharing
//! the file can still lose each other's updates.

use super::{lock, RaceStore};
use crate::{error::SimResult, record::StoredRace};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. The file is created on first write.
    /// An existing file must hold a JSON array of races.
    pub fn open(path: impl AsRef<Path>) -> SimResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        };
        let existing = store.read_all()?;
        log::debug!("{} holds {} races", store.path.display(), existing.len());
        Ok(store)
    }

    fn read_all(&self) -> SimResult<Vec<StoredRace>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            log::warn!("{} is empty, treating as no races", self.path.display());
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrite via a sibling temp file so a crash mid-write never
    /// leaves a truncated array behind.
    fn write_all(&self, races: &[StoredRace]) -> SimResult<()> {
        let json = serde_json::to_string_pretty(races)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RaceStore for JsonFileStore {
    fn backend(&self) -> &'static str { "json_file" }

    fn append(&self, race: &StoredRace) -> SimResult<()> {
        let _held = lock(&self.guard);
        let mut races = self.read_all()?;
        races.push(race.clone());
        self.write_all(&races)
    }

    fn list_all(&self) -> SimResult<Vec<StoredRace>> {
        let _held = lock(&self.guard);
        self.read_all()
    }

    fn find_by_id(&self, id: &str) -> SimResult<Option<StoredRace>> {
        let _held = lock(&self.guard);
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    fn delete_by_id(&self, id: &str) -> SimResult<bool> {
        let _held = lock(&self.guard);
        let mut races = self.read_all()?;
        let before = races.len();
        races.retain(|r| r.id != id);
        if races.len() == before {
            return Ok(false);
        }
        self.write_all(&races)?;
        Ok(true)
    }
}
