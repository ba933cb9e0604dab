//! Domain error taxonomy for neetplan.
//!
//! Library operations (planner, stores, checklist) return [`PlannerError`];
//! command handlers wrap it in `anyhow::Error` on the way out.

use thiserror::Error;

/// Errors surfaced by planner operations and the persistence layer.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// No active profile is configured, so there is no database to act on.
    #[error("no active profile; run `neetplan init --profile <name>` first")]
    NotAuthenticated,

    /// A read or write against a store failed.
    #[error("failed to {operation}: {message}")]
    PersistenceFailure { operation: &'static str, message: String },

    /// Input rejected before reaching the store.
    #[error("invalid input: {0}")]
    ValidationFailure(String),

    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl PlannerError {
    /// Wraps any displayable store error as a persistence failure for `operation`.
    pub fn persistence(operation: &'static str, err: impl std::fmt::Display) -> Self {
        PlannerError::PersistenceFailure {
            operation,
            message: err.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PlannerError::ValidationFailure(message.into())
    }
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
