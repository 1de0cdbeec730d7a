//! SQLite persistence.
//!
//! Runners and winner are stored as JSON text columns; the `seq`
//! column keeps insertion order for listing.

use super::{lock, RaceStore};
use crate::{
    error::{RaceError, SimResult},
    record::StoredRace,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Raw column values, converted outside the rusqlite row closure so
/// JSON and timestamp errors surface as RaceError.
struct RaceRow {
    race_id:       String,
    runner_count:  i64,
    distance:      f64,
    elapsed_steps: i64,
    runners_json:  String,
    winner_json:   String,
    created_at:    String,
}

impl RaceRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            race_id:       row.get(0)?,
            runner_count:  row.get(1)?,
            distance:      row.get(2)?,
            elapsed_steps: row.get(3)?,
            runners_json:  row.get(4)?,
            winner_json:   row.get(5)?,
            created_at:    row.get(6)?,
        })
    }

    fn into_stored(self) -> SimResult<StoredRace> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                RaceError::Other(anyhow::anyhow!(
                    "race {}: bad created_at '{}': {e}",
                    self.race_id,
                    self.created_at
                ))
            })?
            .with_timezone(&Utc);
        Ok(StoredRace {
            id:            self.race_id,
            runner_count:  self.runner_count as u32,
            distance:      self.distance,
            elapsed_steps: self.elapsed_steps as u64,
            runners:       serde_json::from_str(&self.runners_json)?,
            winner:        serde_json::from_str(&self.winner_json)?,
            created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT race_id, runner_count, distance, elapsed_steps,
        runners_json, winner_json, created_at
 FROM race";

impl SqliteStore {
    /// Open (or create) the race database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only applies to real files.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        lock(&self.conn).execute_batch(include_str!("../../../migrations/001_races.sql"))?;
        Ok(())
    }
}

impl RaceStore for SqliteStore {
    fn backend(&self) -> &'static str { "sqlite" }

    fn append(&self, race: &StoredRace) -> SimResult<()> {
        let runners_json = serde_json::to_string(&race.runners)?;
        let winner_json = serde_json::to_string(&race.winner)?;
        let created_at = race.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        lock(&self.conn).execute(
            "INSERT INTO race (
                race_id, runner_count, distance, elapsed_steps,
                runners_json, winner_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &race.id,
                race.runner_count as i64,
                race.distance,
                race.elapsed_steps as i64,
                runners_json,
                winner_json,
                created_at,
            ],
        )?;
        Ok(())
    }

    fn list_all(&self) -> SimResult<Vec<StoredRace>> {
        let conn = lock(&self.conn);
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY seq ASC"))?;
        let rows = stmt
            .query_map([], RaceRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RaceRow::into_stored).collect()
    }

    fn find_by_id(&self, id: &str) -> SimResult<Option<StoredRace>> {
        let conn = lock(&self.conn);
        let row = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE race_id = ?1"),
                params![id],
                RaceRow::from_row,
            )
            .optional()?;
        row.map(RaceRow::into_stored).transpose()
    }

    fn delete_by_id(&self, id: &str) -> SimResult<bool> {
        let deleted = lock(&self.conn).execute("DELETE FROM race WHERE race_id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
