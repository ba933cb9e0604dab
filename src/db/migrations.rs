//! Versioned schema migrations.
//!
//! The schema history is the [`MIGRATIONS`] table below: each entry is an SQL
//! batch tagged with a version. Applied versions are recorded in the
//! `migrations` table. Everything pending runs in one transaction, so a
//! failing batch leaves the schema at its previous version.
//!
//! ```rust
//! use neetplan::db::migrations::{migrate, schema_version, MigrationManager};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! migrate(&mut conn)?;
//! assert_eq!(schema_version(&conn)?, MigrationManager::new().latest_version());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

const CREATE_MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS migrations (
    version INTEGER NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

/// Append only. Versions ascend without gaps.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_tasks_and_settings",
        sql: "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT NOT NULL PRIMARY KEY,
                subject_id TEXT NOT NULL,
                chapter_id TEXT NOT NULL,
                date DATE NOT NULL,
                duration INTEGER NOT NULL,
                task_type TEXT NOT NULL,
                priority TEXT NOT NULL,
                is_completed BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                start_date DATE NOT NULL,
                end_date DATE NOT NULL,
                daily_hours INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_tasks_date ON tasks(date);
            CREATE INDEX IF NOT EXISTS idx_tasks_chapter ON tasks(subject_id, chapter_id);",
    },
    Migration {
        version: 2,
        name: "add_chapter_progress",
        sql: "CREATE TABLE IF NOT EXISTS chapter_progress (
                subject_id TEXT NOT NULL,
                chapter_id TEXT NOT NULL,
                is_ncert_read BOOLEAN NOT NULL DEFAULT FALSE,
                is_video_watched BOOLEAN NOT NULL DEFAULT FALSE,
                is_practice_done BOOLEAN NOT NULL DEFAULT FALSE,
                revision_count INTEGER NOT NULL DEFAULT 0,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (subject_id, chapter_id)
            );",
    },
    // Per-subject breakdown is a JSON array in `scores`.
    Migration {
        version: 3,
        name: "add_test_scores",
        sql: "CREATE TABLE IF NOT EXISTS test_scores (
                id TEXT NOT NULL PRIMARY KEY,
                date DATE NOT NULL,
                kind TEXT NOT NULL,
                scores TEXT NOT NULL,
                remarks TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_test_scores_date ON test_scores(date);",
    },
    Migration {
        version: 4,
        name: "add_mistakes",
        sql: "CREATE TABLE IF NOT EXISTS mistakes (
                id TEXT NOT NULL PRIMARY KEY,
                subject_id TEXT NOT NULL,
                chapter_id TEXT NOT NULL,
                content TEXT NOT NULL,
                solution TEXT,
                priority TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                is_resolved BOOLEAN NOT NULL DEFAULT FALSE,
                revision_count INTEGER NOT NULL DEFAULT 0,
                last_revised DATETIME
            );
            CREATE INDEX IF NOT EXISTS idx_mistakes_chapter ON mistakes(subject_id, chapter_id);",
    },
    Migration {
        version: 5,
        name: "add_sessions_and_achievements",
        sql: "CREATE TABLE IF NOT EXISTS study_sessions (
                id INTEGER PRIMARY KEY,
                date DATE NOT NULL,
                minutes INTEGER NOT NULL,
                recorded_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS achievements (
                key TEXT NOT NULL PRIMARY KEY,
                unlocked_at DATETIME NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_study_sessions_date ON study_sessions(date);",
    },
];

/// A row of the `migrations` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: String,
    pub applied_at: String,
}

pub struct MigrationManager {
    migrations: &'static [Migration],
}

impl MigrationManager {
    pub fn new() -> Self {
        MigrationManager { migrations: MIGRATIONS }
    }

    /// Applies every migration newer than the recorded version and returns how many ran.
    pub fn run(&self, conn: &mut Connection) -> Result<usize> {
        conn.execute(CREATE_MIGRATIONS_TABLE, [])?;

        let current = self.current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current).collect();
        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(0);
        }
        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in &pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            let applied = tx
                .execute_batch(migration.sql)
                .and_then(|_| {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )
                })
                .with_context(|| format!("migration {} ({})", migration.version, migration.name));

            if let Err(e) = applied {
                msg_error!(Message::MigrationFailed(migration.version, format!("{:#}", e)));
                return Err(e);
            }
            msg_debug!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;

        msg_debug!(Message::AllMigrationsCompleted);
        Ok(pending.len())
    }

    /// Highest applied version; zero on a fresh database.
    pub fn current_version(&self, conn: &Connection) -> Result<u32> {
        let has_table = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
                [],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !has_table {
            return Ok(0);
        }

        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map_or(0, |m| m.version)
    }

    pub fn is_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        Ok(self.current_version(conn)? >= version && version > 0)
    }

    /// Applied migrations, oldest first.
    pub fn history(&self, conn: &Connection) -> Result<Vec<AppliedMigration>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(AppliedMigration {
                    version: row.get(0)?,
                    name: row.get(1)?,
                    applied_at: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings `conn` up to the latest schema.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run(conn).map(|_| ())
}

pub fn schema_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().current_version(conn)
}

/// `true` while migrations are pending.
pub fn is_outdated(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.current_version(conn)? < manager.latest_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_ascend_without_gaps() {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, i + 1, "{}", migration.name);
        }
    }

    #[test]
    fn test_fresh_connection_is_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        assert!(is_outdated(&conn).unwrap());
    }

    #[test]
    fn test_second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();
        assert_eq!(manager.run(&mut conn).unwrap(), MIGRATIONS.len());
        assert_eq!(manager.run(&mut conn).unwrap(), 0);
    }
}
