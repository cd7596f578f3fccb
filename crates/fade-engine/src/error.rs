//! # Engine Error Types
//!
//! The error taxonomy callers of the engine see.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       EngineError                                       │
//! │                                                                         │
//! │  Validation   Malformed input (period, amounts, rates, UUIDs).         │
//! │               Rejected BEFORE any read; zero state change.             │
//! │                                                                         │
//! │  NotFound     Unknown barber / calculation / adjustment, or a barber   │
//! │               without an active policy. No partial state change.       │
//! │                                                                         │
//! │  Conflict     The operation contradicts a lock already taken:          │
//! │               deleting an applied adjustment.                          │
//! │               (Recalculating a paid period is NOT a conflict - it is   │
//! │               a silent no-op returning the frozen record.)             │
//! │                                                                         │
//! │  Integrity    Upstream sale data violates its own invariants; the      │
//! │               whole aggregation is aborted, never patched around.      │
//! │                                                                         │
//! │  Db           Storage failures (connection, constraint, transaction).  │
//! │                                                                         │
//! │  Nothing is retried automatically. Callers may retry because the       │
//! │  operations are idempotent, not because the engine re-executes.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use fade_core::{CoreError, ValidationError};
use fade_db::DbError;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before any read.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The operation contradicts committed state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upstream sale data is corrupt; aggregation was aborted.
    #[error("data integrity violation: {0}")]
    Integrity(CoreError),

    /// Storage failure.
    #[error(transparent)]
    Db(DbError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Lifts storage errors, promoting row-level NotFound into the caller
/// taxonomy.
impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => EngineError::NotFound { entity, id },
            other => EngineError::Db(other),
        }
    }
}

/// Routes core errors: integrity violations keep their own category,
/// wrapped validation errors join the validation category.
impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => EngineError::Validation(v),
            integrity => EngineError::Integrity(integrity),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
