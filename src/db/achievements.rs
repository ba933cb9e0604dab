use crate::libs::error::{PlannerError, Result};
use chrono::Local;
use rusqlite::{params, Connection};

const UNLOCK: &str = "INSERT OR IGNORE INTO achievements (key, unlocked_at) VALUES (?1, ?2)";
const SELECT_KEYS: &str = "SELECT key FROM achievements ORDER BY unlocked_at, key";

/// Unlocked achievement keys. A key is stored at most once.
pub struct Achievements<'a> {
    conn: &'a Connection,
}

impl<'a> Achievements<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Achievements { conn }
    }

    /// Returns `false` when `key` was already unlocked.
    pub fn unlock(&mut self, key: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute(UNLOCK, params![key, Local::now()])
            .map_err(|e| PlannerError::persistence("unlock achievement", e))?;
        Ok(changed > 0)
    }

    pub fn unlocked(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_KEYS)
            .map_err(|e| PlannerError::persistence("load achievements", e))?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
            .map_err(|e| PlannerError::persistence("load achievements", e))?;
        Ok(keys)
    }
}
