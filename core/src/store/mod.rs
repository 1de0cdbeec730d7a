//! Race persistence.
//!
//! RULE: Only the store module touches files or the database.
//! The engine talks to storage through the RaceStore capability and
//! never knows which backend is behind it.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{config::StoreConfig, error::SimResult, record::StoredRace};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Storage capability for finished races.
///
/// Every backend lists races in insertion order. A missing id is
/// `Ok(None)` / `Ok(false)`, never an error.
pub trait RaceStore: Send + Sync {
    /// Stable backend name, for logs.
    fn backend(&self) -> &'static str;

    fn append(&self, race: &StoredRace) -> SimResult<()>;

    fn list_all(&self) -> SimResult<Vec<StoredRace>>;

    fn find_by_id(&self, id: &str) -> SimResult<Option<StoredRace>>;

    /// Returns true if a race was removed.
    fn delete_by_id(&self, id: &str) -> SimResult<bool>;
}

/// Open the backend selected by `config`, applying schema where needed.
pub fn open_store(config: &StoreConfig) -> SimResult<Box<dyn RaceStore>> {
    let store: Box<dyn RaceStore> = match config {
        StoreConfig::Memory => Box::new(MemoryStore::new()),
        StoreConfig::JsonFile { path } => Box::new(JsonFileStore::open(path)?),
        StoreConfig::Sqlite { path } => {
            let store = if path == ":memory:" {
                SqliteStore::in_memory()?
            } else {
                SqliteStore::open(path)?
            };
            store.migrate()?;
            Box::new(store)
        }
    };
    log::info!("Opened '{}' race store", store.backend());
    Ok(store)
}

/// A panicked writer leaves the data itself intact, so keep serving it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
