use super::migrations::migrate;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::{PlannerError, Result};
use rusqlite::Connection;
use std::path::Path;

/// Database file for `profile` inside the data directory.
pub fn db_file_name(profile: &str) -> String {
    format!("{}.db", profile)
}

/// A migrated SQLite connection. Stores borrow its connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path).map_err(|e| PlannerError::persistence("open database", e))?;
        Self::migrated(conn)
    }

    pub fn for_profile(storage: &DataStorage, profile: &str) -> Result<Db> {
        let path = storage
            .get_path(&db_file_name(profile))
            .map_err(|e| PlannerError::persistence("resolve database path", e))?;
        Self::open(&path)
    }

    pub fn in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory().map_err(|e| PlannerError::persistence("open database", e))?;
        Self::migrated(conn)
    }

    fn migrated(mut conn: Connection) -> Result<Db> {
        migrate(&mut conn).map_err(|e| PlannerError::persistence("migrate database", e))?;
        Ok(Db { conn })
    }
}

/// Reads a text column into any type parsed by `FromStr`.
pub(crate) fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}
