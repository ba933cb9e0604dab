//! SQLite persistence, one database file per profile.
//!
//! [`db::Db`] opens a connection and brings its schema up to date; every
//! store below borrows that connection, so several stores can work on the
//! same database at once:
//!
//! ```rust
//! use neetplan::db::{db::Db, settings::Settings, tasks::Tasks};
//! use neetplan::libs::planner::TaskStore;
//!
//! let db = Db::in_memory()?;
//! let tasks = Tasks::new(&db.conn);
//! let _settings = Settings::new(&db.conn);
//! assert!(tasks.list_tasks()?.is_empty());
//! # Ok::<(), neetplan::libs::error::PlannerError>(())
//! ```
//!
//! Store errors surface as `PlannerError::PersistenceFailure`, or `NotFound`
//! when an update or delete matches no row.

/// Connection setup.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Unlocked achievement keys.
pub mod achievements;

/// Logged mistakes.
pub mod mistakes;

/// Chapter checklist rows.
pub mod progress;

/// Test scores.
pub mod scores;

/// Completed focus sessions.
pub mod sessions;

/// Study window settings.
pub mod settings;

/// Study plan tasks.
pub mod tasks;
